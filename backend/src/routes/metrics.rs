use serde::{Deserialize, Serialize};

// =========================================================
// Availability metrics types
// =========================================================

/// Reliability/availability KPIs for one query window.
///
/// Percentages are clamped to `[0, 100]`, the mean times are hours ≥ 0,
/// and every field is rounded to two decimals. A zeroed value is the
/// defined "insufficient data" result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityMetrics {
    /// Fraction of wall-clock time the turbine actually produced power.
    pub operational_availability: f64,
    /// Production time against the window minus weather and maintenance
    /// downtime, isolating technical performance.
    pub technical_availability: f64,
    /// Mean time between failures.
    pub mtbf: qtty::Hours,
    /// Mean time to repair.
    pub mttr: qtty::Hours,
    /// Share of weather downtime free of a coincident technical fault.
    pub reliability: f64,
}

impl AvailabilityMetrics {
    /// The well-defined result for "cannot compute yet": a missing or
    /// degenerate window, or fewer than two power samples.
    pub fn zeroed() -> Self {
        Self {
            operational_availability: 0.0,
            technical_availability: 0.0,
            mtbf: qtty::Hours::new(0.0),
            mttr: qtty::Hours::new(0.0),
            reliability: 0.0,
        }
    }

    pub fn is_zeroed(&self) -> bool {
        *self == Self::zeroed()
    }
}
