//! 试验间统计
//!
//! 对独立重复试验的样本计算 Student-t 双侧置信区间。

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::StatsError;

pub const DEFAULT_CONFIDENCE: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
    pub level: f64,
}

impl ConfidenceInterval {
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn half_width(&self) -> f64 {
        (self.upper - self.lower) / 2.0
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

/// 区间估计。样本方差为零时区间无定义，只报告均值。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntervalEstimate {
    Interval(ConfidenceInterval),
    Degenerate { mean: f64 },
}

impl IntervalEstimate {
    pub fn mean(&self) -> f64 {
        match self {
            Self::Interval(ci) => ci.mean,
            Self::Degenerate { mean } => *mean,
        }
    }

    pub fn interval(&self) -> Option<&ConfidenceInterval> {
        match self {
            Self::Interval(ci) => Some(ci),
            Self::Degenerate { .. } => None,
        }
    }
}

pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// 无偏样本方差（除以 n-1）。
pub fn sample_variance(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let m = mean(samples);
    let ss: f64 = samples.iter().map(|x| (x - m) * (x - m)).sum();
    ss / (samples.len() - 1) as f64
}

/// 自由度为 `n - 1` 的 Student-t 双侧置信区间。
pub fn t_interval(samples: &[f64], level: f64) -> Result<IntervalEstimate, StatsError> {
    let n = samples.len();
    if n < 2 {
        return Err(StatsError::TooFewSamples(n));
    }
    if !(level > 0.0 && level < 1.0) {
        return Err(StatsError::InvalidLevel(level));
    }

    if let Some(&bad) = samples.iter().find(|x| !x.is_finite()) {
        return Err(StatsError::NonFiniteSample(bad));
    }

    let m = mean(samples);
    let var = sample_variance(samples);
    if !var.is_finite() {
        return Err(StatsError::NonFiniteSample(var));
    }
    if var == 0.0 {
        return Ok(IntervalEstimate::Degenerate { mean: m });
    }

    let dist =
        StudentsT::new(0.0, 1.0, (n - 1) as f64).map_err(|_| StatsError::TooFewSamples(n))?;
    let q = dist.inverse_cdf(1.0 - (1.0 - level) / 2.0);
    let half = q * (var / n as f64).sqrt();
    Ok(IntervalEstimate::Interval(ConfidenceInterval {
        mean: m,
        lower: m - half,
        upper: m + half,
        level,
    }))
}
