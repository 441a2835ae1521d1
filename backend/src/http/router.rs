//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression,
//! tracing), and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Dataset upload & listing
        .route("/datasets", get(handlers::list_datasets))
        .route("/datasets", post(handlers::create_dataset))
        .route("/datasets/{dataset_id}/extent", get(handlers::get_extent))
        // KPI endpoints
        .route("/datasets/{dataset_id}/metrics", get(handlers::get_metrics))
        .route("/datasets/{dataset_id}/trends", get(handlers::get_trends))
        .route("/datasets/{dataset_id}/window", put(handlers::set_window))
        // Annotations
        .route(
            "/datasets/{dataset_id}/annotations",
            get(handlers::list_annotations),
        )
        .route(
            "/datasets/{dataset_id}/annotations",
            post(handlers::create_annotation),
        )
        .route(
            "/datasets/{dataset_id}/annotations/{annotation_id}",
            delete(handlers::delete_annotation),
        );

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Allow large CSV payloads during uploads.
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
