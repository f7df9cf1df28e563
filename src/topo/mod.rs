//! 拓扑构建与预置场景

pub mod fan_out_fan_in;
pub mod linear;
pub mod presets;

pub use fan_out_fan_in::{FanOutFanInOpts, build_fan_out_fan_in};
pub use linear::{LinearOpts, build_linear};
pub use presets::Preset;
