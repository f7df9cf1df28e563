//! 单站占用仿真
//!
//! 场所内始终保持 `population` 人：有人离开就立即补入新人，
//! 每人的停留时间按分布采样。对每种分布独立维护离开时刻列表，
//! 用实际入场人数估计有效到达间隔 `total_time / admitted`，
//! 与 Little 公式 `W / L` 对照。

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ConfigError, StatsError};
use crate::queue::insert_sorted;
use crate::sim::{Dist, DistKind, SimRng, SimTime};
use crate::stats::{IntervalEstimate, t_interval};

#[derive(Debug, Clone)]
pub struct OccupancyOpts {
    /// 场内人数上限（Little 公式中的 L）
    pub population: usize,
    /// 平均停留时间（秒，Little 公式中的 W）
    pub mean_stay: f64,
    pub kinds: Vec<DistKind>,
    pub total_time: SimTime,
}

impl Default for OccupancyOpts {
    fn default() -> Self {
        Self {
            population: 60,
            mean_stay: 300.0 * 60.0,
            kinds: DistKind::ALL.to_vec(),
            total_time: SimTime(10_000_000),
        }
    }
}

/// 一种停留分布在一次运行中的结果。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OccupancyOutcome {
    pub kind: DistKind,
    pub admitted: u64,
    /// 有效平均到达间隔
    pub interarrival: f64,
    pub min_stay: f64,
    pub max_stay: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancySummary {
    pub kind: DistKind,
    pub interarrival: IntervalEstimate,
}

struct Lane {
    dist: Dist,
    leaving: Vec<f64>,
    admitted: u64,
    min_stay: f64,
    max_stay: f64,
}

impl Lane {
    fn refill(&mut self, now: f64, population: usize, rng: &mut SimRng) {
        while self.leaving.len() < population {
            let stay = self.dist.sample(rng);
            self.min_stay = self.min_stay.min(stay);
            self.max_stay = self.max_stay.max(stay);
            self.admitted = self.admitted.saturating_add(1);
            insert_sorted(&mut self.leaving, now + stay);
        }
    }
}

#[derive(Debug, Clone)]
pub struct OccupancySim {
    opts: OccupancyOpts,
}

impl OccupancySim {
    pub fn new(opts: OccupancyOpts) -> Result<Self, ConfigError> {
        if opts.population == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if opts.total_time == SimTime::ZERO {
            return Err(ConfigError::ZeroHorizon);
        }
        Dist::new(DistKind::Constant, opts.mean_stay)?;
        Ok(Self { opts })
    }

    pub fn opts(&self) -> &OccupancyOpts {
        &self.opts
    }

    /// 运行一次，直到时钟超过 `total_time`。
    pub fn run(&self, rng: &mut SimRng) -> Vec<OccupancyOutcome> {
        let mut lanes: Vec<Lane> = self
            .opts
            .kinds
            .iter()
            .map(|&kind| Lane {
                dist: Dist {
                    kind,
                    mean: self.opts.mean_stay,
                },
                leaving: Vec::with_capacity(self.opts.population),
                admitted: 0,
                min_stay: f64::INFINITY,
                max_stay: 0.0,
            })
            .collect();

        let mut tick = SimTime::ZERO;
        while tick <= self.opts.total_time {
            let t = tick.as_f64();
            let mut next = f64::INFINITY;
            for lane in &mut lanes {
                let done = lane.leaving.partition_point(|&x| x < t);
                lane.leaving.drain(..done);
                lane.refill(t, self.opts.population, rng);
                next = next.min(lane.leaving[0]);
            }
            tick = SimTime::after(next);
        }

        let window = self.opts.total_time.as_f64();
        lanes
            .iter()
            .map(|lane| {
                debug!(kind = ?lane.dist.kind, admitted = lane.admitted, "占用仿真结束");
                OccupancyOutcome {
                    kind: lane.dist.kind,
                    admitted: lane.admitted,
                    interarrival: window / lane.admitted.max(1) as f64,
                    min_stay: lane.min_stay,
                    max_stay: lane.max_stay,
                }
            })
            .collect()
    }

    /// 重复 `trials` 次，返回每次的结果与每种分布的到达间隔置信区间。
    pub fn run_trials(
        &self,
        trials: u64,
        confidence: f64,
        rng: &mut SimRng,
    ) -> Result<(Vec<Vec<OccupancyOutcome>>, Vec<OccupancySummary>), StatsError> {
        let runs: Vec<Vec<OccupancyOutcome>> = (0..trials)
            .map(|n| {
                let out = self.run(rng);
                info!(trial = n, "占用试验完成");
                out
            })
            .collect();

        let summaries = self
            .opts
            .kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| {
                let samples: Vec<f64> = runs.iter().map(|r| r[i].interarrival).collect();
                Ok(OccupancySummary {
                    kind,
                    interarrival: t_interval(&samples, confidence)?,
                })
            })
            .collect::<Result<Vec<_>, StatsError>>()?;
        Ok((runs, summaries))
    }
}
