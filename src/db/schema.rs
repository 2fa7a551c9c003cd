//! SQL DDL for initializing the intake storage.
//! SQLite-first design; every statement is idempotent so it can run on each start.

/// SQLite schema with:
/// - `applications.id` INTEGER PRIMARY KEY AUTOINCREMENT
/// - UNIQUE index on `(offer_id, email)`: at most one application per candidate per offer
/// - `created_at` assigned by the database as RFC3339 text (millisecond precision)
/// - `metrics.name` PRIMARY KEY, `cnt` never negative
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS applications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    offer_id INTEGER NOT NULL,
    email TEXT NOT NULL,
    cv_url TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE UNIQUE INDEX IF NOT EXISTS ux_applications_offer_email ON applications(offer_id, email);

-- Listing is newest first.
CREATE INDEX IF NOT EXISTS idx_applications_created_at ON applications(created_at);

CREATE TABLE IF NOT EXISTS metrics (
    name TEXT PRIMARY KEY,
    cnt INTEGER NOT NULL DEFAULT 0 CHECK (cnt >= 0)
);
"#;
