//! Service Module
//!
//! The computation service and the counters it keeps.

mod computation;
mod stats;

pub use computation::{ComputationService, ServiceSettings};
pub use stats::{KindSnapshot, OperationStats, StatsSnapshot};
