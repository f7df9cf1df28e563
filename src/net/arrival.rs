//! 外部到达过程
//!
//! 生成进入入口节点的到达时刻。叠加到达由若干独立流组成，
//! 每次只推进被消费的那一条流。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::{Dist, SimRng};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArrivalSpec {
    /// 单一到达流，间隔服从 `interval`。
    Single { interval: Dist },
    /// 若干独立到达流的叠加。
    Superposed { streams: Vec<Dist> },
}

impl ArrivalSpec {
    /// 到达间隔均值必须为正，否则时钟无法越过下一到达时刻。
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Single { interval } => positive_gap(interval),
            Self::Superposed { streams } => {
                if streams.is_empty() {
                    return Err(ConfigError::NoArrivalStreams);
                }
                streams.iter().try_for_each(positive_gap)
            }
        }
    }
}

fn positive_gap(gap: &Dist) -> Result<(), ConfigError> {
    gap.validate()?;
    if gap.mean <= 0.0 {
        return Err(ConfigError::InvalidMean(gap.mean));
    }
    Ok(())
}

/// 到达生成器：配置加上各流的下一到达时刻。
#[derive(Debug, Clone)]
pub struct ArrivalProcess {
    spec: ArrivalSpec,
    next: Vec<f64>,
}

impl ArrivalProcess {
    pub fn new(spec: ArrivalSpec) -> Result<Self, ConfigError> {
        spec.validate()?;
        Ok(Self {
            spec,
            next: Vec::new(),
        })
    }

    pub fn single(interval: Dist) -> Result<Self, ConfigError> {
        Self::new(ArrivalSpec::Single { interval })
    }

    pub fn superposed(streams: Vec<Dist>) -> Result<Self, ConfigError> {
        Self::new(ArrivalSpec::Superposed { streams })
    }

    pub fn spec(&self) -> &ArrivalSpec {
        &self.spec
    }

    /// 回到初始状态并返回第一个到达时刻（从 0 起算）。
    pub fn first(&mut self, rng: &mut SimRng) -> f64 {
        match &self.spec {
            ArrivalSpec::Single { interval } => {
                self.next.clear();
                interval.sample(rng)
            }
            ArrivalSpec::Superposed { streams } => {
                self.next = streams.iter().map(|d| d.sample(rng)).collect();
                self.earliest().1
            }
        }
    }

    /// 消费时刻为 `prev` 的到达，返回下一个到达时刻。
    pub fn next_after(&mut self, prev: f64, rng: &mut SimRng) -> f64 {
        let streams = match &self.spec {
            ArrivalSpec::Superposed { streams } => streams.len(),
            ArrivalSpec::Single { .. } => 0,
        };
        if self.next.len() != streams {
            return self.first(rng);
        }
        match &self.spec {
            ArrivalSpec::Single { interval } => prev + interval.sample(rng),
            ArrivalSpec::Superposed { streams } => {
                // 被消费的总是最早的那条流（并列时取下标最小者）。
                let (idx, at) = self.earliest();
                self.next[idx] = at + streams[idx].sample(rng);
                self.earliest().1
            }
        }
    }

    fn earliest(&self) -> (usize, f64) {
        let mut best = (0, f64::INFINITY);
        for (i, &t) in self.next.iter().enumerate() {
            if t < best.1 {
                best = (i, t);
            }
        }
        best
    }
}
