//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST
//! API. The visualization DTOs are re-exported from the routes module
//! since they already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{Annotation, AvailabilityMetrics, DatasetInfo, WeeklyTrendsData};

use crate::models::{DateRange, TimeInterval, Timestamp};

/// Request body for uploading a new dataset.
///
/// Both CSVs are optional individually, but at least one must be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDatasetRequest {
    /// Name for the dataset
    pub name: String,
    /// Raw event-log CSV content
    #[serde(default)]
    pub event_log_csv: Option<String>,
    /// Raw power-curve CSV content
    #[serde(default)]
    pub power_curve_csv: Option<String>,
}

/// Response for dataset listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetListResponse {
    pub datasets: Vec<DatasetInfo>,
    pub total: usize,
}

/// Data extent of a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtentResponse {
    /// Earliest-to-latest span covered by the data, if any record
    /// carries a timestamp.
    pub extent: Option<TimeInterval>,
}

/// Query window in Unix-epoch seconds.
///
/// Omitted bounds fall back to the stored selection, then to the
/// dataset extent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WindowQuery {
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
}

impl WindowQuery {
    pub fn to_range(self) -> DateRange {
        DateRange {
            start: self.start.map(Timestamp::new),
            end: self.end.map(Timestamp::new),
        }
    }
}

/// Request body for storing the analyst's window selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SelectWindowRequest {
    pub start: f64,
    pub end: f64,
}

/// Request body for creating an annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnnotationRequest {
    /// Range start, Unix-epoch seconds
    pub start: f64,
    /// Range end, Unix-epoch seconds
    pub end: f64,
    /// Comment text
    pub text: String,
}

/// Response for annotation listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationListResponse {
    pub annotations: Vec<Annotation>,
    pub total: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub datasets: usize,
}
