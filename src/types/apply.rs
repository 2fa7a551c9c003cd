use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::db::models::{Application, IntakeStats};

/// Field name -> human readable message. Empty means the payload is valid.
pub type FieldErrors = BTreeMap<String, String>;

/// A validated `POST /apply` payload, normalized for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyRequest {
    pub offer_id: i64,
    /// Always lowercased.
    pub email: String,
    pub cv_url: String,
}

/// Body of a successful `POST /apply`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApplyResponse {
    pub application: Application,
    pub message: String,
}

/// Body of `GET /stats`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsResponse {
    pub applies: i64,
    pub success_calls: i64,
    pub failed_calls: i64,
}

impl From<IntakeStats> for StatsResponse {
    fn from(s: IntakeStats) -> Self {
        Self {
            applies: s.applications_total,
            success_calls: s.success,
            failed_calls: s.failed,
        }
    }
}

/// Body of `GET /applications`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApplicationsResponse {
    pub applications: Vec<Application>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
