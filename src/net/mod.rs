//! 排队网络模块
//!
//! 由有序的节点列表、到达过程与路由策略组成，驱动事件跳转时钟。

mod arrival;
mod network;
mod routing;

pub use arrival::{ArrivalProcess, ArrivalSpec};
pub use network::{Network, RunTotals};
pub use routing::Routing;
