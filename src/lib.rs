pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;
pub mod types;

pub use error::IntakeError;
pub use service::{IntakeService, validate_apply_payload};
