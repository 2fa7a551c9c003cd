use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::IntakeError;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Runtime configuration, built once in `main` and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    pub log_format: LogFormat,
    pub db_max_connections: u32,
    pub db_busy_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://offer-intake.sqlite".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            log_format: LogFormat::Json,
            db_max_connections: 8,
            db_busy_timeout_secs: 5,
        }
    }
}

impl Config {
    /// Defaults, overridden by environment variables of the same name in upper case
    /// (`DATABASE_URL`, `LISTEN_ADDR`, `LOGLEVEL`, `LOG_FORMAT`, ...).
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::raw().only(&[
            "database_url",
            "listen_addr",
            "loglevel",
            "log_format",
            "db_max_connections",
            "db_busy_timeout_secs",
        ]))
    }

    pub fn load() -> Result<Self, IntakeError> {
        Ok(Self::figment().extract()?)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.db_busy_timeout_secs)
    }
}
