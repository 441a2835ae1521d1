//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::annotations::Annotation;
pub use crate::routes::landing::DatasetInfo;
pub use crate::routes::metrics::AvailabilityMetrics;
pub use crate::routes::trends::WeeklyTrendsData;

pub use crate::models::{
    DateRange, Kilowatts, MetersPerSecond, PowerCurvePoint, TimeInterval, Timestamp,
    TurbineDataset, TurbineEvent,
};

use serde::{Deserialize, Serialize};

/// Dataset identifier (session-scoped).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DatasetId(pub i64);

/// Annotation identifier (session-scoped).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationId(pub i64);

impl DatasetId {
    pub fn new(value: i64) -> Self {
        DatasetId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AnnotationId {
    pub fn new(value: i64) -> Self {
        AnnotationId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
