use serde::{Deserialize, Serialize};

// =========================================================
// Weekly trends types
// =========================================================

/// Per-calendar-week KPI series for trend charts.
///
/// Parallel arrays, one entry per non-empty week, safe to zip by index.
/// Weeks without any matching data produce no entry at all; absent data
/// renders as no bar, not a zero bar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklyTrendsData {
    /// Week-start (Monday) labels, formatted `YYYY-MM-DD`.
    pub labels: Vec<String>,
    pub ao_data: Vec<f64>,
    pub at_data: Vec<f64>,
    pub reliability_data: Vec<f64>,
}

impl WeeklyTrendsData {
    pub fn week_count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
