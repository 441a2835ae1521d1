//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! parsing, store and service layers for the actual work.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AnnotationListResponse, CreateAnnotationRequest, CreateDatasetRequest, DatasetListResponse,
    ExtentResponse, HealthResponse, SelectWindowRequest, WindowQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{
    Annotation, AnnotationId, AvailabilityMetrics, DatasetId, DatasetInfo, WeeklyTrendsData,
};
use crate::models::{DateRange, TimeInterval, Timestamp, TurbineDataset};
use crate::parsing;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        datasets: state.store.dataset_count(),
    }))
}

// =============================================================================
// Dataset upload & listing
// =============================================================================

/// GET /v1/datasets
///
/// List all datasets in the session.
pub async fn list_datasets(State(state): State<AppState>) -> HandlerResult<DatasetListResponse> {
    let datasets = state.store.list_datasets();
    let total = datasets.len();

    Ok(Json(DatasetListResponse { datasets, total }))
}

/// POST /v1/datasets
///
/// Upload a dataset from raw CSV content. At least one of the two CSVs
/// must be present.
pub async fn create_dataset(
    State(state): State<AppState>,
    Json(request): Json<CreateDatasetRequest>,
) -> Result<(StatusCode, Json<DatasetInfo>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::BadRequest("Dataset name must not be empty".to_string()));
    }
    if request.event_log_csv.is_none() && request.power_curve_csv.is_none() {
        return Err(AppError::BadRequest(
            "Upload requires an event log CSV, a power curve CSV, or both".to_string(),
        ));
    }

    let events = match &request.event_log_csv {
        Some(csv) => parsing::parse_event_log_str(csv)
            .map_err(|e| AppError::BadRequest(format!("Invalid event log CSV: {}", e)))?,
        None => vec![],
    };
    let power_curve = match &request.power_curve_csv {
        Some(csv) => parsing::parse_power_curve_str(csv)
            .map_err(|e| AppError::BadRequest(format!("Invalid power curve CSV: {}", e)))?,
        None => vec![],
    };

    let checksum = parsing::compute_dataset_checksum(&[
        request.event_log_csv.as_deref().unwrap_or(""),
        request.power_curve_csv.as_deref().unwrap_or(""),
    ]);

    let info = state.store.store_dataset(TurbineDataset {
        name: request.name,
        checksum,
        events,
        power_curve,
    });

    Ok((StatusCode::CREATED, Json(info)))
}

/// GET /v1/datasets/{dataset_id}/extent
///
/// Earliest-to-latest data span of a dataset.
pub async fn get_extent(
    State(state): State<AppState>,
    Path(dataset_id): Path<i64>,
) -> HandlerResult<ExtentResponse> {
    let dataset = state.store.get_dataset(DatasetId::new(dataset_id))?;

    Ok(Json(ExtentResponse {
        extent: dataset.extent(),
    }))
}

// =============================================================================
// Metrics & trends
// =============================================================================

/// GET /v1/datasets/{dataset_id}/metrics
///
/// Availability metrics for the requested window. Omitted bounds fall
/// back to the stored selection, then to the dataset extent. Insufficient
/// data yields the zeroed metrics value, not an error.
pub async fn get_metrics(
    State(state): State<AppState>,
    Path(dataset_id): Path<i64>,
    Query(query): Query<WindowQuery>,
) -> HandlerResult<AvailabilityMetrics> {
    let dataset_id = DatasetId::new(dataset_id);
    let dataset = state.store.get_dataset(dataset_id)?;
    let window = state.store.effective_window(dataset_id, query.to_range())?;

    let metrics = services::calculate_metrics(
        &dataset.events,
        &dataset.power_curve,
        &window,
        &state.config,
    );

    Ok(Json(metrics))
}

/// GET /v1/datasets/{dataset_id}/trends
///
/// Per-calendar-week KPI series for the requested range.
pub async fn get_trends(
    State(state): State<AppState>,
    Path(dataset_id): Path<i64>,
    Query(query): Query<WindowQuery>,
) -> HandlerResult<WeeklyTrendsData> {
    let dataset_id = DatasetId::new(dataset_id);
    let dataset = state.store.get_dataset(dataset_id)?;
    let range = state.store.effective_window(dataset_id, query.to_range())?;

    let trends = services::calculate_weekly_metrics(
        &dataset.events,
        &dataset.power_curve,
        &range,
        &state.config,
    );

    Ok(Json(trends))
}

/// PUT /v1/datasets/{dataset_id}/window
///
/// Store the analyst's selected query window.
pub async fn set_window(
    State(state): State<AppState>,
    Path(dataset_id): Path<i64>,
    Json(request): Json<SelectWindowRequest>,
) -> HandlerResult<DateRange> {
    if request.end <= request.start {
        return Err(AppError::BadRequest(
            "Window end must be after window start".to_string(),
        ));
    }

    let window = DateRange::new(Timestamp::new(request.start), Timestamp::new(request.end));
    state
        .store
        .set_selected_window(DatasetId::new(dataset_id), window)?;

    Ok(Json(window))
}

// =============================================================================
// Annotations
// =============================================================================

/// GET /v1/datasets/{dataset_id}/annotations
///
/// Annotations of a dataset, optionally filtered to those overlapping
/// the given range.
pub async fn list_annotations(
    State(state): State<AppState>,
    Path(dataset_id): Path<i64>,
    Query(query): Query<WindowQuery>,
) -> HandlerResult<AnnotationListResponse> {
    let window = query.to_range().resolve();
    let annotations = state
        .store
        .list_annotations(DatasetId::new(dataset_id), window)?;
    let total = annotations.len();

    Ok(Json(AnnotationListResponse { annotations, total }))
}

/// POST /v1/datasets/{dataset_id}/annotations
///
/// Attach a comment to a time range.
pub async fn create_annotation(
    State(state): State<AppState>,
    Path(dataset_id): Path<i64>,
    Json(request): Json<CreateAnnotationRequest>,
) -> Result<(StatusCode, Json<Annotation>), AppError> {
    let range = TimeInterval::new(Timestamp::new(request.start), Timestamp::new(request.end));
    let annotation = state
        .store
        .add_annotation(DatasetId::new(dataset_id), range, request.text)?;

    Ok((StatusCode::CREATED, Json(annotation)))
}

/// DELETE /v1/datasets/{dataset_id}/annotations/{annotation_id}
pub async fn delete_annotation(
    State(state): State<AppState>,
    Path((dataset_id, annotation_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .remove_annotation(DatasetId::new(dataset_id), AnnotationId::new(annotation_id))?;

    Ok(StatusCode::NO_CONTENT)
}
