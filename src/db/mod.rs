//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and aggregate reads
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the application register and metrics counter

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Application, CreateOutcome, IntakeStats, MetricName};
pub use schema::SQLITE_INIT;
pub use sqlite::{IntakeStorage, SqlitePool};
