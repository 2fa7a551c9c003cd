use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One candidate's submission against one offer, as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Application {
    pub id: i64,
    pub offer_id: i64,
    pub email: String,
    pub cv_url: String,
    pub created_at: DateTime<Utc>,
}

/// Result of `create_or_get_application`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateOutcome {
    pub created: bool,
    pub id: i64,
}

/// Named outcome counters kept in the `metrics` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    Success,
    Failed,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::Success => "success",
            MetricName::Failed => "failed",
        }
    }
}

impl AsRef<str> for MetricName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Aggregate counters. Counters that were never recorded read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntakeStats {
    pub applications_total: i64,
    pub success: i64,
    pub failed: i64,
}
