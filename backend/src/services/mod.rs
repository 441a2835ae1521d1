//! Service layer: interval construction and KPI derivation.
//!
//! Services are pure functions over the domain models. They orchestrate
//! the interval builder and the interval algebra into the published
//! metrics; all state lives with the caller.

pub mod intervals;
pub mod metrics;
pub mod trends;

pub use intervals::{build_operational_intervals, pair_event_intervals, OperationalIntervals};
pub use metrics::calculate_metrics;
pub use trends::calculate_weekly_metrics;
