//! 可复现的随机源
//!
//! 所有随机数都从显式注入的 [`SimRng`] 中取得，不使用线程本地 RNG。
//! 同一种子、同一配置的两次运行逐位一致。

use rand::distributions::Open01;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct SimRng {
    inner: StdRng,
}

impl SimRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// 均匀分布于开区间 (0, 1)，保证可以安全取对数。
    pub fn open01(&mut self) -> f64 {
        self.inner.sample(Open01)
    }

    /// 均匀分布于 [0, 1)。
    pub fn unit(&mut self) -> f64 {
        self.inner.r#gen::<f64>()
    }
}
