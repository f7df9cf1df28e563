//! 节点统计信息
//!
//! 以时间积分方式累计顾客数，供 Little 公式换算平均人数。

use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct NodeStats {
    /// 等待顾客数对时间的积分
    pub wait_area: f64,
    /// 服务中顾客数对时间的积分
    pub service_area: f64,
    pub qmax: usize,
    pub cmax: usize,
    pub admitted: u64,
    pub departed: u64,
    pub last_update: f64,
}

impl NodeStats {
    /// 把 `[last_update, now)` 区间按当前占用量计入积分，并刷新最大值。
    pub fn flush(&mut self, now: f64, waiting: usize, in_service: usize) {
        let dt = now - self.last_update;
        self.wait_area += waiting as f64 * dt;
        self.service_area += in_service as f64 * dt;
        self.qmax = self.qmax.max(waiting);
        self.cmax = self.cmax.max(in_service);
        self.last_update = now;
    }
}
