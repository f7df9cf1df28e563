//! 错误类型
//!
//! 配置错误在构建阶段立即返回，仿真循环内部不产生可恢复错误。

use thiserror::Error;

/// 配置错误：在任何仿真时间推进之前检测。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("node capacity must be at least 1")]
    ZeroCapacity,
    #[error("unknown distribution kind: {0}")]
    UnknownDistribution(String),
    #[error("invalid distribution mean {0}")]
    InvalidMean(f64),
    #[error("network must contain at least one node")]
    EmptyNetwork,
    #[error("route target {target} out of range for {nodes} nodes")]
    RouteOutOfRange { target: usize, nodes: usize },
    #[error("fan-out/fan-in entry must be node 0, got {0}")]
    EntryNotFirst(usize),
    #[error("fan-out/fan-in node {0} is used in more than one role")]
    DuplicateRouteNode(usize),
    #[error("at least 2 trials are required for variance estimation, got {0}")]
    TooFewTrials(u64),
    #[error("total simulated time must be positive")]
    ZeroHorizon,
    #[error("confidence level must lie in (0, 1), got {0}")]
    InvalidConfidence(f64),
    #[error("superposed arrivals need at least one stream")]
    NoArrivalStreams,
    #[error("unsupported schema version {0}")]
    UnsupportedSchema(u32),
}

/// 置信区间计算错误。零方差不属于错误，见 [`crate::stats::IntervalEstimate`]。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("need at least 2 samples, got {0}")]
    TooFewSamples(usize),
    #[error("confidence level must lie in (0, 1), got {0}")]
    InvalidLevel(f64),
    #[error("samples and their variance must be finite, got {0}")]
    NonFiniteSample(f64),
}
