//! 分流-汇聚拓扑构建

use crate::error::ConfigError;
use crate::net::{ArrivalProcess, Network, Routing};
use crate::queue::QueueingNode;
use crate::sim::{Dist, DistKind};

#[derive(Debug, Clone)]
pub struct FanOutFanInOpts {
    pub capacity: usize,
    pub service: Dist,
    /// 叠加到入口节点的独立到达流
    pub streams: Vec<Dist>,
}

impl Default for FanOutFanInOpts {
    fn default() -> Self {
        let stream = Dist {
            kind: DistKind::Exponential,
            mean: 600.0,
        };
        Self {
            capacity: 1,
            service: Dist {
                kind: DistKind::Exponential,
                mean: 180.0,
            },
            streams: vec![stream, stream],
        }
    }
}

/// 构建分流-汇聚拓扑
///
/// 拓扑结构：
/// ```text
///            +-> q1 -+
/// arrivals -> q0     +-> q3 -> exit
///            +-> q2 -+
/// ```
/// q0 的输出送往 q1/q2 中等待队列较短者，相等时送往 q1。
pub fn build_fan_out_fan_in(opts: &FanOutFanInOpts) -> Result<Network, ConfigError> {
    let nodes = (0..4)
        .map(|_| QueueingNode::new(opts.capacity, opts.service))
        .collect::<Result<Vec<_>, _>>()?;
    let routing = Routing::FanOutFanIn {
        entry: 0,
        parallel: [1, 2],
        merge: 3,
    };
    Network::new(nodes, routing, ArrivalProcess::superposed(opts.streams.clone())?)
}
