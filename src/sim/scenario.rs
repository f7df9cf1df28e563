//! 场景描述（scenario.json）
//!
//! 节点、到达过程、拓扑与试验参数的可序列化描述；`build` 校验后生成
//! 可直接运行的 [`Scenario`]。

use serde::{Deserialize, Serialize};

use super::dist::Dist;
use super::time::SimTime;
use super::trial::TrialConfig;
use crate::error::ConfigError;
use crate::net::{ArrivalProcess, ArrivalSpec, Network, Routing};
use crate::queue::QueueingNode;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub schema_version: u32,
    #[serde(default)]
    pub meta: Option<ScenarioMeta>,
    pub topology: Routing,
    pub nodes: Vec<NodeSpec>,
    pub arrivals: ArrivalSpec,
    #[serde(default)]
    pub run: Option<RunSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    pub service: Dist,
}

fn default_capacity() -> usize {
    1
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSpec {
    #[serde(default)]
    pub total_time: Option<u64>,
    #[serde(default)]
    pub trials: Option<u64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RunSpec {
    /// 未给出的字段取 `base` 中的值。
    pub fn apply(&self, base: TrialConfig) -> TrialConfig {
        TrialConfig {
            total_time: self.total_time.map(SimTime).unwrap_or(base.total_time),
            trials: self.trials.unwrap_or(base.trials),
            confidence: self.confidence.unwrap_or(base.confidence),
            seed: self.seed.unwrap_or(base.seed),
        }
    }
}

/// 已校验、可运行的场景。
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub network: Network,
    pub trials: TrialConfig,
}

impl Scenario {
    pub fn new(
        name: impl Into<String>,
        network: Network,
        trials: TrialConfig,
    ) -> Result<Self, ConfigError> {
        trials.validate()?;
        Ok(Self {
            name: name.into(),
            network,
            trials,
        })
    }
}

impl ScenarioSpec {
    pub fn build(&self) -> Result<Scenario, ConfigError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ConfigError::UnsupportedSchema(self.schema_version));
        }
        let nodes = self
            .nodes
            .iter()
            .map(|n| QueueingNode::new(n.capacity, n.service))
            .collect::<Result<Vec<_>, _>>()?;
        let arrivals = ArrivalProcess::new(self.arrivals.clone())?;
        let network = Network::new(nodes, self.topology.clone(), arrivals)?;
        let trials = self
            .run
            .clone()
            .unwrap_or_default()
            .apply(TrialConfig::default());
        let name = self
            .meta
            .as_ref()
            .and_then(|m| m.name.clone())
            .unwrap_or_else(|| "scenario".to_string());
        Scenario::new(name, network, trials)
    }
}
