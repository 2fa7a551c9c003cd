use axum::http::StatusCode;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::db::models::{Application, IntakeStats, MetricName};
use crate::db::sqlite::IntakeStorage;
use crate::error::IntakeError;
use crate::service::validator::parse_apply_payload;
use crate::types::apply::ApplyRequest;

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOutcome {
    pub application: Application,
    pub created: bool,
}

impl ApplyOutcome {
    pub fn status(&self) -> StatusCode {
        if self.created {
            StatusCode::CREATED
        } else {
            StatusCode::OK
        }
    }

    pub fn message(&self) -> &'static str {
        if self.created {
            "Application created"
        } else {
            "Application already exists"
        }
    }
}

/// Per-request unit of work around the application register and metrics counter.
#[derive(Clone)]
pub struct IntakeService {
    storage: IntakeStorage,
}

impl IntakeService {
    pub fn new(storage: IntakeStorage) -> Self {
        Self { storage }
    }

    /// Handle one `POST /apply` payload (or the error produced while extracting it).
    ///
    /// Exactly one outcome metric is recorded per call: `success` when this returns
    /// `Ok`, `failed` otherwise. The metric is written after, and independently of,
    /// the register transaction.
    pub async fn apply(
        &self,
        payload: Result<Map<String, Value>, IntakeError>,
    ) -> Result<ApplyOutcome, IntakeError> {
        let result = match payload {
            Ok(data) => self.submit(&data).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(outcome) => {
                self.record(MetricName::Success).await;
                info!(
                    path = "/apply",
                    status = outcome.status().as_u16(),
                    id = outcome.application.id,
                    offer_id = outcome.application.offer_id,
                    email = %outcome.application.email,
                    "apply_success"
                );
            }
            Err(e) => {
                self.record(MetricName::Failed).await;
                match e {
                    IntakeError::InvalidJson(reason) => {
                        warn!(path = "/apply", reason = %reason, "apply_invalid_json");
                    }
                    IntakeError::Validation(errors) => {
                        warn!(path = "/apply", errors = ?errors, "apply_validation_failed");
                    }
                    other => {
                        error!(path = "/apply", error = %other, "apply_error");
                    }
                }
            }
        }

        result
    }

    /// Validate, then create-or-fetch and read the row back.
    async fn submit(&self, data: &Map<String, Value>) -> Result<ApplyOutcome, IntakeError> {
        let ApplyRequest {
            offer_id,
            email,
            cv_url,
        } = parse_apply_payload(data).map_err(IntakeError::Validation)?;

        let outcome = self
            .storage
            .create_or_get_application(offer_id, &email, &cv_url)
            .await?;
        let application = self
            .storage
            .find_application_by_id(outcome.id)
            .await?
            .ok_or(IntakeError::MissingAfterPersist(outcome.id))?;

        Ok(ApplyOutcome {
            application,
            created: outcome.created,
        })
    }

    async fn record(&self, name: MetricName) {
        if let Err(e) = self.storage.record_metric(name).await {
            warn!(metric = name.as_str(), error = %e, "failed to record metric");
        }
    }

    pub async fn stats(&self) -> Result<IntakeStats, IntakeError> {
        self.storage.fetch_stats().await
    }

    pub async fn list(&self) -> Result<Vec<Application>, IntakeError> {
        self.storage.fetch_all_applications().await
    }
}
