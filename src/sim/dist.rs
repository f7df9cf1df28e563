//! 时长分布采样
//!
//! 只支持三种分布：指数、均匀、常数。种类在构建阶段解析，
//! 采样本身不会失败。

use serde::{Deserialize, Deserializer, Serialize};

use super::rng::SimRng;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistKind {
    Exponential,
    Uniform,
    Constant,
}

impl DistKind {
    pub const ALL: [DistKind; 3] = [DistKind::Exponential, DistKind::Uniform, DistKind::Constant];

    /// 解析分布名称，接受全称与单字母代码（`e` / `r` / `c`）。
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_lowercase().as_str() {
            "e" | "exp" | "exponential" => Ok(Self::Exponential),
            "r" | "u" | "uniform" => Ok(Self::Uniform),
            "c" | "const" | "constant" => Ok(Self::Constant),
            _ => Err(ConfigError::UnknownDistribution(raw.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Exponential => "exp",
            Self::Uniform => "rand",
            Self::Constant => "const",
        }
    }
}

impl<'de> Deserialize<'de> for DistKind {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// 带均值的分布：服务时间与到达间隔共用。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dist {
    pub kind: DistKind,
    pub mean: f64,
}

impl Dist {
    pub fn new(kind: DistKind, mean: f64) -> Result<Self, ConfigError> {
        let dist = Self { kind, mean };
        dist.validate()?;
        Ok(dist)
    }

    pub fn exponential(mean: f64) -> Result<Self, ConfigError> {
        Self::new(DistKind::Exponential, mean)
    }

    pub fn uniform(mean: f64) -> Result<Self, ConfigError> {
        Self::new(DistKind::Uniform, mean)
    }

    pub fn constant(mean: f64) -> Result<Self, ConfigError> {
        Self::new(DistKind::Constant, mean)
    }

    /// 反序列化得到的值绕过了 `new`，因此需要单独校验。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.mean.is_finite() || self.mean < 0.0 {
            return Err(ConfigError::InvalidMean(self.mean));
        }
        Ok(())
    }

    /// 采样一个非负时长。常数分布不消耗随机数，其余每次恰好消耗一次。
    pub fn sample(&self, rng: &mut SimRng) -> f64 {
        match self.kind {
            DistKind::Constant => self.mean,
            // 泊松过程的事件间隔，速率为 1/mean
            DistKind::Exponential => -self.mean * rng.open01().ln(),
            // [0, 2*mean)，期望为 mean
            DistKind::Uniform => self.mean * 2.0 * rng.unit(),
        }
    }
}
