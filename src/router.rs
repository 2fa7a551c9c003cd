use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::db::sqlite::IntakeStorage;
use crate::handlers::intake::{apply_handler, health_handler, list_handler, stats_handler};
use crate::middleware::cors::cors_layer;
use crate::service::IntakeService;

/// Shared router state. Cheap to clone: it only holds the pooled storage handle.
#[derive(Clone)]
pub struct IntakeState {
    pub intake: IntakeService,
}

impl IntakeState {
    pub fn new(storage: IntakeStorage) -> Self {
        Self {
            intake: IntakeService::new(storage),
        }
    }
}

pub fn intake_router(state: IntakeState) -> Router {
    Router::new()
        .route("/apply", post(apply_handler))
        .route("/stats", get(stats_handler))
        .route("/applications", get(list_handler))
        .route("/list", get(list_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}
