//! Usage telemetry for the gateway dashboard.
//!
//! Counts answered messages (total and per channel), estimates the support
//! time saved, and keeps the counters in a small JSON file so they survive
//! restarts.

mod config;
mod error;
mod snapshot;
mod stats;

pub use config::StatsConfig;
pub use error::StatsError;
pub use snapshot::StatsSnapshot;
pub use stats::UsageStats;
