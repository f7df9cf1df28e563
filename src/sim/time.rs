//! 仿真时间类型
//!
//! 时钟以最小时间粒度（秒）为单位前进；服务完成时刻是实数，
//! 由 [`SimTime::as_f64`] 与其比较。

use serde::{Deserialize, Serialize};

/// 仿真时钟（秒）。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    pub fn from_secs(s: u64) -> SimTime {
        SimTime(s)
    }
    pub fn from_mins(m: u64) -> SimTime {
        SimTime(m.saturating_mul(60))
    }
    pub fn from_hours(h: u64) -> SimTime {
        SimTime(h.saturating_mul(3_600))
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    /// 跳到 `at` 所在时间单位之后的下一个整数时刻：`floor(at) + 1`。
    ///
    /// 同一时间单位内的所有事件因此被视为同时发生。无穷大饱和为 `u64::MAX`。
    pub fn after(at: f64) -> SimTime {
        let floor = at.floor();
        if floor >= u64::MAX as f64 {
            return SimTime(u64::MAX);
        }
        SimTime((floor.max(0.0) as u64).saturating_add(1))
    }
}
