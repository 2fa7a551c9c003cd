use axum::{Json, extract::State, http::StatusCode};

use crate::error::IntakeError;
use crate::middleware::JsonObject;
use crate::router::IntakeState;
use crate::types::apply::{ApplicationsResponse, ApplyResponse, HealthResponse, StatsResponse};

/// POST /apply -> 201 when the application is new, 200 when it already existed.
pub async fn apply_handler(
    State(state): State<IntakeState>,
    payload: Result<JsonObject, IntakeError>,
) -> Result<(StatusCode, Json<ApplyResponse>), IntakeError> {
    let outcome = state
        .intake
        .apply(payload.map(|JsonObject(data)| data))
        .await?;

    let status = outcome.status();
    let message = outcome.message().to_string();
    Ok((
        status,
        Json(ApplyResponse {
            application: outcome.application,
            message,
        }),
    ))
}

/// GET /stats
pub async fn stats_handler(
    State(state): State<IntakeState>,
) -> Result<Json<StatsResponse>, IntakeError> {
    let stats = state.intake.stats().await.inspect_err(|e| {
        tracing::error!(path = "/stats", error = %e, "stats_error");
    })?;
    Ok(Json(stats.into()))
}

/// GET /applications (also served as GET /list)
pub async fn list_handler(
    State(state): State<IntakeState>,
) -> Result<Json<ApplicationsResponse>, IntakeError> {
    let applications = state.intake.list().await.inspect_err(|e| {
        tracing::error!(path = "/applications", error = %e, "list_error");
    })?;
    Ok(Json(ApplicationsResponse { applications }))
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
