//! 独立重复试验与汇总
//!
//! 每次试验前清空网络，按 Little 公式的时间积分形式计算
//! `L = Σ(服务积分 + 等待积分) / T` 与 `Lq = Σ等待积分 / T`。
//! 所有试验共用一个持续推进的随机流。

use serde::Serialize;
use tracing::{debug, info};

use super::rng::SimRng;
use super::time::SimTime;
use crate::error::{ConfigError, StatsError};
use crate::net::Network;
use crate::stats::{DEFAULT_CONFIDENCE, IntervalEstimate, t_interval};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialConfig {
    pub total_time: SimTime,
    pub trials: u64,
    pub confidence: f64,
    pub seed: u64,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            total_time: SimTime(10_000_000),
            trials: 10,
            confidence: DEFAULT_CONFIDENCE,
            seed: 1,
        }
    }
}

impl TrialConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_time == SimTime::ZERO {
            return Err(ConfigError::ZeroHorizon);
        }
        if self.trials < 2 {
            return Err(ConfigError::TooFewTrials(self.trials));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(ConfigError::InvalidConfidence(self.confidence));
        }
        Ok(())
    }
}

/// 单个节点在一次试验结束时的诊断信息。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeSnapshot {
    pub qmax: usize,
    pub cmax: usize,
    pub admitted: u64,
    pub departed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialMetrics {
    /// 平均系统内顾客数
    pub l: f64,
    /// 平均等待顾客数
    pub lq: f64,
    pub admitted: u64,
    pub exited: u64,
    pub nodes: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialReport {
    pub total_time: SimTime,
    pub confidence: f64,
    pub seed: u64,
    pub trials: Vec<TrialMetrics>,
    pub l: IntervalEstimate,
    pub lq: IntervalEstimate,
}

#[derive(Debug, Clone)]
pub struct TrialRunner {
    config: TrialConfig,
}

impl TrialRunner {
    pub fn new(config: TrialConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrialConfig {
        &self.config
    }

    /// 完整运行一次（运行前网络自动清空），返回 (L, Lq) 及各节点诊断信息。
    pub fn run_trial(&self, network: &mut Network, rng: &mut SimRng) -> TrialMetrics {
        let totals = network.run(self.config.total_time, rng);

        let window = self.config.total_time.as_f64();
        let mut service = 0.0;
        let mut wait = 0.0;
        let mut nodes = Vec::with_capacity(network.nodes().len());
        for (i, node) in network.nodes().iter().enumerate() {
            service += node.total_service_customer_time();
            wait += node.total_wait_customer_time();
            let stats = node.stats();
            debug!(node = i, qmax = stats.qmax, cmax = stats.cmax, "节点最大值");
            nodes.push(NodeSnapshot {
                qmax: stats.qmax,
                cmax: stats.cmax,
                admitted: stats.admitted,
                departed: stats.departed,
            });
        }

        TrialMetrics {
            l: (service + wait) / window,
            lq: wait / window,
            admitted: totals.admitted,
            exited: totals.exited,
            nodes,
        }
    }

    /// 运行全部试验并计算 L、Lq 的置信区间。
    #[tracing::instrument(
        skip(self, network, rng),
        fields(trials = self.config.trials, total_time = self.config.total_time.0)
    )]
    pub fn run(
        &self,
        network: &mut Network,
        rng: &mut SimRng,
    ) -> Result<TrialReport, StatsError> {
        info!("▶️  开始试验");
        let mut trials = Vec::with_capacity(self.config.trials as usize);
        for n in 0..self.config.trials {
            let metrics = self.run_trial(network, rng);
            info!(trial = n, l = metrics.l, lq = metrics.lq, "试验完成");
            trials.push(metrics);
        }

        let ls: Vec<f64> = trials.iter().map(|m| m.l).collect();
        let lqs: Vec<f64> = trials.iter().map(|m| m.lq).collect();
        let l = t_interval(&ls, self.config.confidence)?;
        let lq = t_interval(&lqs, self.config.confidence)?;
        info!(l = l.mean(), lq = lq.mean(), "✅ 全部试验完成");

        Ok(TrialReport {
            total_time: self.config.total_time,
            confidence: self.config.confidence,
            seed: self.config.seed,
            trials,
            l,
            lq,
        })
    }
}
