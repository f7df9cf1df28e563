//! 排队节点（Queueing nodes）
//!
//! 一个节点是 `capacity` 个并行窗口加一条无界 FIFO 等待队列，
//! 并按时间加权累计在队/在服务的顾客数。

mod node;
mod stats;

pub use node::QueueingNode;
pub use stats::NodeStats;

/// 有序插入（相同值插在已有元素之后），保持 `v` 升序。
pub fn insert_sorted(v: &mut Vec<f64>, x: f64) {
    let idx = v.partition_point(|&y| y <= x);
    v.insert(idx, x);
}

/// 检查 `v` 是否升序。
pub fn is_sorted(v: &[f64]) -> bool {
    v.windows(2).all(|w| w[0] <= w[1])
}
