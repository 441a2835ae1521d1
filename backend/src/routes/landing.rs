use serde::{Deserialize, Serialize};

use crate::api::DatasetId;

/// Summary row for the dataset picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub dataset_id: DatasetId,
    pub dataset_name: String,
    pub event_count: usize,
    pub sample_count: usize,
    /// SHA-256 over the uploaded CSV content.
    pub checksum: String,
}
