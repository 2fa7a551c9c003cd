use crate::types::apply::FieldErrors;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum IntakeError {
    #[error("Invalid JSON payload: {0}")]
    InvalidJson(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Failed to load application {0} after persistence")]
    MissingAfterPersist(i64),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl IntakeError {
    /// Caller mistakes (4xx) as opposed to failures of the service itself.
    pub fn is_input_error(&self) -> bool {
        matches!(self, IntakeError::InvalidJson(_) | IntakeError::Validation(_))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            IntakeError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            IntakeError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            IntakeError::DatabaseError(_)
            | IntakeError::MissingAfterPersist(_)
            | IntakeError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<figment::Error> for IntakeError {
    fn from(e: figment::Error) -> Self {
        IntakeError::Config(Box::new(e))
    }
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        match self {
            IntakeError::Validation(errors) => {
                (status, Json(ValidationErrorResponse { errors })).into_response()
            }
            IntakeError::InvalidJson(_) => (
                status,
                Json(ApiErrorResponse {
                    error: "Invalid JSON payload".to_string(),
                }),
            )
                .into_response(),
            // Internal details are logged by the caller, never sent.
            IntakeError::DatabaseError(_)
            | IntakeError::MissingAfterPersist(_)
            | IntakeError::Config(_) => (
                status,
                Json(ApiErrorResponse {
                    error: "Internal server error".to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Error body for 400 and 500 responses.
#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// Error body for 422 responses: one message per offending field.
#[derive(Serialize)]
pub struct ValidationErrorResponse {
    pub errors: FieldErrors,
}
