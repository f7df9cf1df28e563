//! 仿真核心模块
//!
//! 此模块包含仿真时间、随机源、分布采样、试验执行与场景描述。

// 子模块声明
mod dist;
mod rng;
mod scenario;
mod time;
mod trial;

// 重新导出公共接口
pub use dist::{Dist, DistKind};
pub use rng::SimRng;
pub use scenario::{NodeSpec, RunSpec, SCHEMA_VERSION, Scenario, ScenarioMeta, ScenarioSpec};
pub use time::SimTime;
pub use trial::{NodeSnapshot, TrialConfig, TrialMetrics, TrialReport, TrialRunner};
