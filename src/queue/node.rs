//! 有限窗口排队节点
//!
//! `in_service` 保存服务完成的绝对时刻并保持升序；`waiting` 保存到达时
//! 已采样好的服务时长，开始服务时才换算成完成时刻。

use std::collections::VecDeque;

use tracing::trace;

use super::stats::NodeStats;
use super::{insert_sorted, is_sorted};
use crate::error::ConfigError;
use crate::sim::{Dist, SimRng, SimTime};

#[derive(Debug, Clone)]
pub struct QueueingNode {
    capacity: usize,
    service: Dist,
    in_service: Vec<f64>,
    waiting: VecDeque<f64>,
    stats: NodeStats,
}

impl QueueingNode {
    pub fn new(capacity: usize, service: Dist) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        service.validate()?;
        Ok(Self {
            capacity,
            service,
            in_service: Vec::with_capacity(capacity),
            waiting: VecDeque::new(),
            stats: NodeStats::default(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn service(&self) -> Dist {
        self.service
    }

    /// `count` 个顾客在 `at` 到达。
    ///
    /// 每个顾客到达时即采样服务时长；有空闲窗口则立即开始服务，否则排队。
    /// `count == 0` 时不修改状态，也不消耗随机数。
    pub fn enqueue(&mut self, at: SimTime, count: u64, rng: &mut SimRng) {
        for _ in 0..count {
            let duration = self.service.sample(rng);
            if self.in_service.len() < self.capacity {
                insert_sorted(&mut self.in_service, at.as_f64() + duration);
            } else {
                self.waiting.push_back(duration);
            }
        }
        self.stats.admitted = self.stats.admitted.saturating_add(count);
    }

    /// 推进到 `now`：刷新统计、移出完成时刻严格早于 `now` 的顾客，
    /// 再把等待顾客补进空闲窗口。返回离开节点的顾客数。
    pub fn advance(&mut self, now: SimTime) -> u64 {
        let t = now.as_f64();
        self.stats.flush(t, self.waiting.len(), self.in_service.len());

        let done = self.in_service.partition_point(|&c| c < t);
        self.in_service.drain(..done);

        while self.in_service.len() < self.capacity {
            let Some(duration) = self.waiting.pop_front() else {
                break;
            };
            insert_sorted(&mut self.in_service, t + duration);
        }

        let out = done as u64;
        if out > 0 {
            trace!(now = now.0, out, waiting = self.waiting.len(), "顾客离开");
        }
        self.stats.departed = self.stats.departed.saturating_add(out);
        out
    }

    /// 最早的服务完成时刻；没有顾客在服务时为正无穷。
    pub fn next_event_time(&self) -> f64 {
        self.in_service.first().copied().unwrap_or(f64::INFINITY)
    }

    /// 当前等待队列长度（负载均衡路由使用）。
    pub fn queue_len(&self) -> usize {
        self.waiting.len()
    }

    pub fn in_service_len(&self) -> usize {
        self.in_service.len()
    }

    pub fn resident(&self) -> usize {
        self.waiting.len() + self.in_service.len()
    }

    /// 服务中顾客的完成时刻（升序）。
    pub fn in_service(&self) -> &[f64] {
        &self.in_service
    }

    pub fn total_service_customer_time(&self) -> f64 {
        self.stats.service_area
    }

    pub fn total_wait_customer_time(&self) -> f64 {
        self.stats.wait_area
    }

    pub fn stats(&self) -> &NodeStats {
        &self.stats
    }

    /// 检查窗口数与排序不变量。
    pub fn check_invariants(&self) -> bool {
        self.in_service.len() <= self.capacity && is_sorted(&self.in_service)
    }

    /// 清空顾客与统计；容量和服务分布保持不变。
    pub fn clear(&mut self) {
        self.in_service.clear();
        self.waiting.clear();
        self.stats = NodeStats::default();
    }
}
