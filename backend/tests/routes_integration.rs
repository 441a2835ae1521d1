//! HTTP round-trip tests against the full router.

#![cfg(feature = "http-server")]

mod support;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use windops_rust::config::AnalysisConfig;
use windops_rust::http::{create_router, AppState};
use windops_rust::store::SessionStore;

// 2024-03-04 00:00:00 UTC, the first fixture timestamp.
const T0: f64 = 1_709_510_400.0;
const HOUR: f64 = 3_600.0;

fn app() -> Router {
    let state = AppState::new(SessionStore::new(), AnalysisConfig::default());
    create_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn upload_fixture_dataset(app: &Router) -> i64 {
    let payload = json!({
        "name": "turbine-07",
        "event_log_csv": support::read_fixture("event_log.csv"),
        "power_curve_csv": support::read_fixture("power_curve.csv"),
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/v1/datasets", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["event_count"], 4);
    assert_eq!(body["sample_count"], 25);
    body["dataset_id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_reports_dataset_count() {
    let app = app();

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["datasets"], 0);
}

#[tokio::test]
async fn upload_then_list_datasets() {
    let app = app();
    let dataset_id = upload_fixture_dataset(&app).await;

    let response = app.clone().oneshot(get("/v1/datasets")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["datasets"][0]["dataset_id"], dataset_id);
    assert_eq!(body["datasets"][0]["dataset_name"], "turbine-07");
    // Checksum is stable across identical uploads.
    assert_eq!(body["datasets"][0]["checksum"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn upload_requires_some_csv_content() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/datasets",
            &json!({"name": "empty"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn metrics_for_explicit_window() {
    let app = app();
    let dataset_id = upload_fixture_dataset(&app).await;

    let uri = format!(
        "/v1/datasets/{}/metrics?start={}&end={}",
        dataset_id,
        T0,
        T0 + 4.0 * HOUR
    );
    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["operational_availability"], 62.5);
    assert_eq!(body["technical_availability"], 83.33);
    assert_eq!(body["mtbf"], 2.5);
    assert_eq!(body["mttr"], 0.5);
    assert_eq!(body["reliability"], 100.0);
}

#[tokio::test]
async fn metrics_fall_back_to_extent_then_selection() {
    let app = app();
    let dataset_id = upload_fixture_dataset(&app).await;

    // No explicit window: the dataset extent (through the 06:00
    // maintenance record) applies.
    let uri = format!("/v1/datasets/{}/metrics", dataset_id);
    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["operational_availability"], 41.67);
    assert_eq!(body["technical_availability"], 62.5);

    // Store a selection; parameterless queries now use it.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/v1/datasets/{}/window", dataset_id),
            &json!({"start": T0, "end": T0 + 4.0 * HOUR}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["operational_availability"], 62.5);
}

#[tokio::test]
async fn extent_endpoint_reports_data_span() {
    let app = app();
    let dataset_id = upload_fixture_dataset(&app).await;

    let response = app
        .clone()
        .oneshot(get(&format!("/v1/datasets/{}/extent", dataset_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["extent"]["start"], T0);
    assert_eq!(body["extent"]["end"], T0 + 6.0 * HOUR);
}

#[tokio::test]
async fn trends_returns_one_entry_for_the_fixture_week() {
    let app = app();
    let dataset_id = upload_fixture_dataset(&app).await;

    let response = app
        .clone()
        .oneshot(get(&format!("/v1/datasets/{}/trends", dataset_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["labels"].as_array().unwrap().len(), 1);
    assert_eq!(body["labels"][0], "2024-03-04");
    assert_eq!(body["ao_data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn annotation_crud_roundtrip() {
    let app = app();
    let dataset_id = upload_fixture_dataset(&app).await;

    // Create.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/v1/datasets/{}/annotations", dataset_id),
            &json!({"start": T0 + HOUR, "end": T0 + 2.0 * HOUR, "text": "icing suspected"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let annotation_id = created["id"].as_i64().unwrap();

    // List: present.
    let list_uri = format!("/v1/datasets/{}/annotations", dataset_id);
    let body = body_json(app.clone().oneshot(get(&list_uri)).await.unwrap()).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["annotations"][0]["text"], "icing suspected");

    // Range filter: a disjoint window sees nothing.
    let filtered_uri = format!(
        "/v1/datasets/{}/annotations?start={}&end={}",
        dataset_id,
        T0 + 3.0 * HOUR,
        T0 + 4.0 * HOUR
    );
    let body = body_json(app.clone().oneshot(get(&filtered_uri)).await.unwrap()).await;
    assert_eq!(body["total"], 0);

    // Delete, then the list is empty.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!(
                    "/v1/datasets/{}/annotations/{}",
                    dataset_id, annotation_id
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = body_json(app.clone().oneshot(get(&list_uri)).await.unwrap()).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn unknown_dataset_is_not_found() {
    let app = app();

    let response = app
        .clone()
        .oneshot(get("/v1/datasets/999/metrics"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn invalid_window_selection_is_rejected() {
    let app = app();
    let dataset_id = upload_fixture_dataset(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/v1/datasets/{}/window", dataset_id),
            &json!({"start": T0 + HOUR, "end": T0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
