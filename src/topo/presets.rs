//! 预置场景
//!
//! 时间单位为秒；默认每次试验 10_000_000 秒、共 10 次试验。

use super::fan_out_fan_in::{FanOutFanInOpts, build_fan_out_fan_in};
use super::linear::{LinearOpts, build_linear};
use crate::error::ConfigError;
use crate::sim::{Dist, Scenario, TrialConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// 单窗口，均匀分布服务（均值 3 分钟），指数到达（均值 5 分钟）
    Mm1Uniform,
    /// 单窗口，指数服务（均值 3 分钟），指数到达（均值 5 分钟）
    Mm1,
    /// 4 窗口，指数服务（均值 2 分钟），指数到达（均值 1 分钟）
    Mmc,
    /// 三段串联，每段单窗口
    Tandem,
    /// 入口 -> 两个并行节点 -> 汇聚节点，两条叠加到达流（各均值 10 分钟）
    FanOutFanIn,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Mm1Uniform,
        Preset::Mm1,
        Preset::Mmc,
        Preset::Tandem,
        Preset::FanOutFanIn,
    ];

    pub fn parse(raw: &str) -> Result<Self, String> {
        let compact: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .filter(|ch| *ch != '_' && *ch != '-')
            .collect();
        match compact.as_str() {
            "mm1uniform" => Ok(Self::Mm1Uniform),
            "mm1" => Ok(Self::Mm1),
            "mmc" | "mm4" => Ok(Self::Mmc),
            "tandem" | "linear" => Ok(Self::Tandem),
            "fanoutfanin" => Ok(Self::FanOutFanIn),
            _ => Err(format!("unknown preset: {raw}")),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Mm1Uniform => "mm1_uniform",
            Self::Mm1 => "mm1",
            Self::Mmc => "mmc",
            Self::Tandem => "tandem",
            Self::FanOutFanIn => "fan_out_fan_in",
        }
    }

    pub fn build(self, trials: TrialConfig) -> Result<Scenario, ConfigError> {
        let network = match self {
            Self::Mm1Uniform => build_linear(&LinearOpts {
                service: Dist::uniform(180.0)?,
                ..LinearOpts::default()
            })?,
            Self::Mm1 => build_linear(&LinearOpts::default())?,
            Self::Mmc => build_linear(&LinearOpts {
                capacity: 4,
                service: Dist::exponential(120.0)?,
                arrival: Dist::exponential(60.0)?,
                ..LinearOpts::default()
            })?,
            Self::Tandem => build_linear(&LinearOpts {
                stages: 3,
                ..LinearOpts::default()
            })?,
            Self::FanOutFanIn => build_fan_out_fan_in(&FanOutFanInOpts::default())?,
        };
        Scenario::new(self.name(), network, trials)
    }
}
