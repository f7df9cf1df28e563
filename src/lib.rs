pub mod error;
pub mod net;
pub mod occupancy;
pub mod queue;
pub mod sim;
pub mod stats;
pub mod topo;

pub use error::{ConfigError, StatsError};

#[cfg(test)]
mod test;
