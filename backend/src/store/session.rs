//! In-memory session state.
//!
//! Everything an analyst session holds (uploaded datasets, the selected
//! query window per dataset, annotations) lives in one explicit
//! [`SessionStore`] value. The store is cloned-by-handle into whoever
//! needs it (the HTTP state, tests) and passed as an argument; there is
//! deliberately no module-level singleton, so the analysis core stays a
//! pure function of its inputs and concurrent sessions cannot observe
//! each other.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::{AnnotationId, DatasetId};
use crate::models::{DateRange, TimeInterval, Timestamp, TurbineDataset};
use crate::routes::annotations::Annotation;
use crate::routes::landing::DatasetInfo;
use crate::store::error::{StoreError, StoreResult};

/// Session-scoped application state.
///
/// Cheap to clone; clones share the same underlying data.
#[derive(Clone, Default)]
pub struct SessionStore {
    data: Arc<RwLock<SessionData>>,
}

struct SessionData {
    datasets: HashMap<DatasetId, TurbineDataset>,
    selected_windows: HashMap<DatasetId, DateRange>,
    annotations: HashMap<DatasetId, Vec<Annotation>>,

    // ID counters
    next_dataset_id: DatasetId,
    next_annotation_id: AnnotationId,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            datasets: HashMap::new(),
            selected_windows: HashMap::new(),
            annotations: HashMap::new(),
            next_dataset_id: DatasetId(1),
            next_annotation_id: AnnotationId(1),
        }
    }
}

impl SessionStore {
    /// Create a new empty session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an uploaded dataset and return its summary.
    pub fn store_dataset(&self, dataset: TurbineDataset) -> DatasetInfo {
        let mut data = self.data.write();
        let dataset_id = data.next_dataset_id;
        data.next_dataset_id = DatasetId(dataset_id.0 + 1);

        let info = DatasetInfo {
            dataset_id,
            dataset_name: dataset.name.clone(),
            event_count: dataset.event_count(),
            sample_count: dataset.sample_count(),
            checksum: dataset.checksum.clone(),
        };

        data.datasets.insert(dataset_id, dataset);
        info
    }

    /// Fetch a dataset by id.
    pub fn get_dataset(&self, dataset_id: DatasetId) -> StoreResult<TurbineDataset> {
        let data = self.data.read();
        data.datasets
            .get(&dataset_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Dataset {} not found", dataset_id.0)))
    }

    /// List dataset summaries, ordered by id.
    pub fn list_datasets(&self) -> Vec<DatasetInfo> {
        let data = self.data.read();

        let mut infos: Vec<DatasetInfo> = data
            .datasets
            .iter()
            .map(|(id, dataset)| DatasetInfo {
                dataset_id: *id,
                dataset_name: dataset.name.clone(),
                event_count: dataset.event_count(),
                sample_count: dataset.sample_count(),
                checksum: dataset.checksum.clone(),
            })
            .collect();

        infos.sort_by_key(|info| info.dataset_id);
        infos
    }

    /// Number of datasets stored.
    pub fn dataset_count(&self) -> usize {
        self.data.read().datasets.len()
    }

    /// Remember the analyst's selected query window for a dataset.
    pub fn set_selected_window(
        &self,
        dataset_id: DatasetId,
        window: DateRange,
    ) -> StoreResult<()> {
        let mut data = self.data.write();
        if !data.datasets.contains_key(&dataset_id) {
            return Err(StoreError::NotFound(format!(
                "Dataset {} not found",
                dataset_id.0
            )));
        }
        data.selected_windows.insert(dataset_id, window);
        Ok(())
    }

    /// The stored selection for a dataset, if any.
    pub fn selected_window(&self, dataset_id: DatasetId) -> Option<DateRange> {
        self.data.read().selected_windows.get(&dataset_id).copied()
    }

    /// Resolve the window to analyze: explicit request, else the stored
    /// selection, else the dataset's full extent.
    pub fn effective_window(
        &self,
        dataset_id: DatasetId,
        requested: DateRange,
    ) -> StoreResult<DateRange> {
        if requested.resolve().is_some() {
            return Ok(requested);
        }

        if let Some(selected) = self.selected_window(dataset_id) {
            if selected.resolve().is_some() {
                return Ok(selected);
            }
        }

        let dataset = self.get_dataset(dataset_id)?;
        Ok(dataset
            .extent()
            .map(DateRange::from)
            .unwrap_or_else(DateRange::unset))
    }

    /// Attach an annotation to a time range of a dataset.
    pub fn add_annotation(
        &self,
        dataset_id: DatasetId,
        range: TimeInterval,
        text: String,
    ) -> StoreResult<Annotation> {
        if text.trim().is_empty() {
            return Err(StoreError::ValidationError(
                "Annotation text must not be empty".to_string(),
            ));
        }
        if range.end.value() < range.start.value() {
            return Err(StoreError::ValidationError(
                "Annotation range must not be inverted".to_string(),
            ));
        }

        let mut data = self.data.write();
        if !data.datasets.contains_key(&dataset_id) {
            return Err(StoreError::NotFound(format!(
                "Dataset {} not found",
                dataset_id.0
            )));
        }

        let id = data.next_annotation_id;
        data.next_annotation_id = AnnotationId(id.0 + 1);

        let annotation = Annotation {
            id,
            range,
            text,
            created_at: Timestamp::from_datetime(chrono::Utc::now()),
        };

        data.annotations
            .entry(dataset_id)
            .or_default()
            .push(annotation.clone());

        Ok(annotation)
    }

    /// Annotations of a dataset, optionally filtered to those overlapping
    /// a window, ordered by range start.
    pub fn list_annotations(
        &self,
        dataset_id: DatasetId,
        window: Option<TimeInterval>,
    ) -> StoreResult<Vec<Annotation>> {
        let data = self.data.read();
        if !data.datasets.contains_key(&dataset_id) {
            return Err(StoreError::NotFound(format!(
                "Dataset {} not found",
                dataset_id.0
            )));
        }

        let mut annotations: Vec<Annotation> = data
            .annotations
            .get(&dataset_id)
            .map(|list| {
                list.iter()
                    .filter(|a| match &window {
                        Some(w) => a.range.overlaps(w),
                        None => true,
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        annotations.sort_by(|a, b| {
            a.range
                .start
                .value()
                .partial_cmp(&b.range.start.value())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(annotations)
    }

    /// Remove one annotation.
    pub fn remove_annotation(
        &self,
        dataset_id: DatasetId,
        annotation_id: AnnotationId,
    ) -> StoreResult<()> {
        let mut data = self.data.write();

        let annotations = data.annotations.get_mut(&dataset_id).ok_or_else(|| {
            StoreError::NotFound(format!("Dataset {} has no annotations", dataset_id.0))
        })?;

        let before = annotations.len();
        annotations.retain(|a| a.id != annotation_id);

        if annotations.len() == before {
            return Err(StoreError::NotFound(format!(
                "Annotation {} not found",
                annotation_id.0
            )));
        }
        Ok(())
    }

    /// Drop all session state.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = SessionData::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Kilowatts, MetersPerSecond, PowerCurvePoint};

    fn dataset(name: &str) -> TurbineDataset {
        TurbineDataset {
            name: name.to_string(),
            checksum: format!("checksum_{}", name),
            events: vec![],
            power_curve: vec![
                PowerCurvePoint {
                    timestamp: Some(Timestamp::new(1_000.0)),
                    power: Kilowatts::new(100.0),
                    wind_speed: MetersPerSecond::new(8.0),
                    ref_power: Kilowatts::new(100.0),
                },
                PowerCurvePoint {
                    timestamp: Some(Timestamp::new(2_000.0)),
                    power: Kilowatts::new(90.0),
                    wind_speed: MetersPerSecond::new(7.0),
                    ref_power: Kilowatts::new(95.0),
                },
            ],
        }
    }

    fn interval(start: f64, end: f64) -> TimeInterval {
        TimeInterval::new(Timestamp::new(start), Timestamp::new(end))
    }

    #[test]
    fn test_store_and_retrieve_dataset() {
        let store = SessionStore::new();

        let info = store.store_dataset(dataset("turbine-01"));
        assert_eq!(info.dataset_id.value(), 1);
        assert_eq!(info.sample_count, 2);

        let retrieved = store.get_dataset(info.dataset_id).unwrap();
        assert_eq!(retrieved.name, "turbine-01");
    }

    #[test]
    fn test_list_datasets_is_ordered() {
        let store = SessionStore::new();
        store.store_dataset(dataset("a"));
        store.store_dataset(dataset("b"));

        let infos = store.list_datasets();

        assert_eq!(infos.len(), 2);
        assert!(infos[0].dataset_id < infos[1].dataset_id);
    }

    #[test]
    fn test_not_found_error() {
        let store = SessionStore::new();
        let result = store.get_dataset(DatasetId(999));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_selected_window_roundtrip() {
        let store = SessionStore::new();
        let info = store.store_dataset(dataset("a"));

        assert!(store.selected_window(info.dataset_id).is_none());

        let window = DateRange::new(Timestamp::new(0.0), Timestamp::new(100.0));
        store.set_selected_window(info.dataset_id, window).unwrap();

        assert_eq!(store.selected_window(info.dataset_id), Some(window));
    }

    #[test]
    fn test_effective_window_fallback_chain() {
        let store = SessionStore::new();
        let info = store.store_dataset(dataset("a"));

        // Nothing selected: falls back to the dataset extent.
        let fallback = store
            .effective_window(info.dataset_id, DateRange::unset())
            .unwrap();
        assert_eq!(fallback.resolve().unwrap().start.value(), 1_000.0);
        assert_eq!(fallback.resolve().unwrap().end.value(), 2_000.0);

        // Stored selection wins over the extent.
        let selected = DateRange::new(Timestamp::new(1_200.0), Timestamp::new(1_800.0));
        store.set_selected_window(info.dataset_id, selected).unwrap();
        let effective = store
            .effective_window(info.dataset_id, DateRange::unset())
            .unwrap();
        assert_eq!(effective, selected);

        // An explicit request wins over everything.
        let explicit = DateRange::new(Timestamp::new(0.0), Timestamp::new(50.0));
        let effective = store.effective_window(info.dataset_id, explicit).unwrap();
        assert_eq!(effective, explicit);
    }

    #[test]
    fn test_annotation_lifecycle() {
        let store = SessionStore::new();
        let info = store.store_dataset(dataset("a"));

        let annotation = store
            .add_annotation(info.dataset_id, interval(100.0, 200.0), "icing".to_string())
            .unwrap();
        store
            .add_annotation(info.dataset_id, interval(500.0, 600.0), "inspection".to_string())
            .unwrap();

        let all = store.list_annotations(info.dataset_id, None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].text, "icing");

        // Range filter keeps only overlapping annotations.
        let filtered = store
            .list_annotations(info.dataset_id, Some(interval(150.0, 300.0)))
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, annotation.id);

        store
            .remove_annotation(info.dataset_id, annotation.id)
            .unwrap();
        let remaining = store.list_annotations(info.dataset_id, None).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].text, "inspection");
    }

    #[test]
    fn test_annotation_validation() {
        let store = SessionStore::new();
        let info = store.store_dataset(dataset("a"));

        let empty_text =
            store.add_annotation(info.dataset_id, interval(0.0, 10.0), "  ".to_string());
        assert!(matches!(empty_text, Err(StoreError::ValidationError(_))));

        let inverted =
            store.add_annotation(info.dataset_id, interval(10.0, 0.0), "x".to_string());
        assert!(matches!(inverted, Err(StoreError::ValidationError(_))));

        let missing_dataset =
            store.add_annotation(DatasetId(42), interval(0.0, 10.0), "x".to_string());
        assert!(matches!(missing_dataset, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new();
        let clone = store.clone();

        store.store_dataset(dataset("a"));

        assert_eq!(clone.dataset_count(), 1);
    }

    #[test]
    fn test_clear_resets_everything() {
        let store = SessionStore::new();
        let info = store.store_dataset(dataset("a"));
        store
            .add_annotation(info.dataset_id, interval(0.0, 1.0), "x".to_string())
            .unwrap();

        store.clear();

        assert_eq!(store.dataset_count(), 0);
        // Counters restart too.
        let info = store.store_dataset(dataset("b"));
        assert_eq!(info.dataset_id.value(), 1);
    }
}
