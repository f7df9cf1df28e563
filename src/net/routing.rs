//! 节点间路由策略
//!
//! 路由决定某个节点在一次跳转中离开的顾客去往哪个下游节点（或离开系统）。
//! 各拓扑共用同一个节点原语，只替换这里的策略值。

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::ConfigError;
use crate::queue::QueueingNode;
use crate::sim::SimTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Routing {
    /// 节点 i 的输出进入 i+1，最后一个节点的输出离开系统。
    Linear,
    /// `entry` 的输出进入 `parallel` 中等待队列较短者（相等时进入 `parallel[0]`），
    /// 两个并行节点都汇入 `merge`，`merge` 的输出离开系统。
    FanOutFanIn {
        entry: usize,
        parallel: [usize; 2],
        merge: usize,
    },
}

impl Routing {
    /// 检查所有目标下标都在节点范围内；扇出/扇入还要求入口为 0 号节点，
    /// 且四个角色互不相同。
    pub fn validate(&self, nodes: usize) -> Result<(), ConfigError> {
        let check = |target: usize| {
            if target < nodes {
                Ok(())
            } else {
                Err(ConfigError::RouteOutOfRange { target, nodes })
            }
        };
        match self {
            Self::Linear => Ok(()),
            Self::FanOutFanIn {
                entry,
                parallel,
                merge,
            } => {
                let roles = [*entry, parallel[0], parallel[1], *merge];
                roles.iter().try_for_each(|&target| check(target))?;
                if *entry != 0 {
                    return Err(ConfigError::EntryNotFirst(*entry));
                }
                for (i, &node) in roles.iter().enumerate() {
                    if roles[..i].contains(&node) {
                        return Err(ConfigError::DuplicateRouteNode(node));
                    }
                }
                Ok(())
            }
        }
    }

    /// 计算 `src` 的 `count` 个离开顾客的去向；`None` 表示离开系统。
    pub fn route(
        &self,
        src: usize,
        count: u64,
        now: SimTime,
        nodes: &[QueueingNode],
    ) -> Option<usize> {
        let dst = match self {
            Self::Linear => (src + 1 < nodes.len()).then_some(src + 1),
            Self::FanOutFanIn {
                entry,
                parallel: [a, b],
                merge,
            } => {
                if src == *entry {
                    // 单窗口节点每次跳转最多输出一个顾客，整批送往同一节点即可。
                    if nodes[*a].queue_len() > nodes[*b].queue_len() {
                        Some(*b)
                    } else {
                        Some(*a)
                    }
                } else if src == *a || src == *b {
                    Some(*merge)
                } else {
                    None
                }
            }
        };
        trace!(now = now.0, src, count, dst = ?dst, "路由");
        dst
    }
}
