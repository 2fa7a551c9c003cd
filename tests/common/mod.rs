#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use offer_intake::db::IntakeStorage;
use offer_intake::router::{IntakeState, intake_router};
use serde_json::Value;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

/// Storage backed by a fresh SQLite file. Keep the `TempDir` alive for the test's duration.
pub async fn temp_storage() -> (TempDir, IntakeStorage) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let database_url = format!("sqlite:{}", dir.path().join("intake.sqlite").display());
    let storage = IntakeStorage::open(&database_url, 8, Duration::from_secs(10))
        .await
        .expect("failed to open storage");
    (dir, storage)
}

pub fn app(storage: IntakeStorage) -> Router {
    intake_router(IntakeState::new(storage))
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app
        .clone()
        .oneshot(request)
        .await
        .expect("request failed");
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body was not JSON")
    };
    (status, json)
}

pub fn post_apply(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/apply")
        .header("content-type", "application/json")
        .body(body.into())
        .expect("failed to build request")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}
