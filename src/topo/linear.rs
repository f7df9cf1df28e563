//! 直线串联拓扑构建

use crate::error::ConfigError;
use crate::net::{ArrivalProcess, Network, Routing};
use crate::queue::QueueingNode;
use crate::sim::{Dist, DistKind};

/// 串联拓扑配置选项
#[derive(Debug, Clone)]
pub struct LinearOpts {
    pub stages: usize,
    pub capacity: usize,
    pub service: Dist,
    pub arrival: Dist,
}

impl Default for LinearOpts {
    fn default() -> Self {
        Self {
            stages: 1,
            capacity: 1,
            service: Dist {
                kind: DistKind::Exponential,
                mean: 180.0,
            },
            arrival: Dist {
                kind: DistKind::Exponential,
                mean: 300.0,
            },
        }
    }
}

/// 构建串联拓扑
///
/// 拓扑结构：arrivals -> q0 -> q1 -> ... -> exit
pub fn build_linear(opts: &LinearOpts) -> Result<Network, ConfigError> {
    let nodes = (0..opts.stages)
        .map(|_| QueueingNode::new(opts.capacity, opts.service))
        .collect::<Result<Vec<_>, _>>()?;
    Network::new(nodes, Routing::Linear, ArrivalProcess::single(opts.arrival)?)
}
