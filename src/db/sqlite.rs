use crate::db::models::{Application, CreateOutcome, IntakeStats, MetricName};
use crate::db::schema::SQLITE_INIT;
use crate::error::IntakeError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Owns the `applications` and `metrics` tables.
#[derive(Clone)]
pub struct IntakeStorage {
    pool: SqlitePool,
}

impl IntakeStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and bootstrap the schema.
    pub async fn open(
        database_url: &str,
        max_connections: u32,
        busy_timeout: Duration,
    ) -> Result<Self, IntakeError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(busy_timeout);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(connect_opts)
            .await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), IntakeError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert a new application, or return the id of the one already stored for
    /// `(offer_id, email)`. The first write wins; `cv_url` of later calls is ignored.
    ///
    /// A uniqueness violation whose natural key cannot be found afterwards is returned
    /// as the original database error.
    pub async fn create_or_get_application(
        &self,
        offer_id: i64,
        email: &str,
        cv_url: &str,
    ) -> Result<CreateOutcome, IntakeError> {
        let mut tx = self.pool.begin().await?;

        let inserted =
            sqlx::query("INSERT INTO applications (offer_id, email, cv_url) VALUES (?, ?, ?)")
                .bind(offer_id)
                .bind(email)
                .bind(cv_url)
                .execute(&mut *tx)
                .await;

        let outcome = match inserted {
            Ok(done) => CreateOutcome {
                created: true,
                id: done.last_insert_rowid(),
            },
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                let existing: Option<(i64,)> = sqlx::query_as(
                    "SELECT id FROM applications WHERE offer_id = ? AND email = ? LIMIT 1",
                )
                .bind(offer_id)
                .bind(email)
                .fetch_optional(&mut *tx)
                .await?;

                let Some((id,)) = existing else {
                    // dropping `tx` rolls back
                    return Err(sqlx::Error::Database(db_err).into());
                };
                debug!(offer_id, id, "application already registered");
                CreateOutcome { created: false, id }
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit().await?;
        Ok(outcome)
    }

    pub async fn find_application_by_id(&self, id: i64) -> Result<Option<Application>, IntakeError> {
        let row = sqlx::query_as::<_, Application>(
            r#"SELECT id, offer_id, email, cv_url, created_at
               FROM applications WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// All applications, newest first.
    pub async fn fetch_all_applications(&self) -> Result<Vec<Application>, IntakeError> {
        let rows = sqlx::query_as::<_, Application>(
            r#"SELECT id, offer_id, email, cv_url, created_at
               FROM applications ORDER BY created_at DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Increment the counter for `name`, creating it at 1 when absent.
    /// Uses SQLite `INSERT ... ON CONFLICT(name) DO UPDATE`, so concurrent first
    /// writers never lose a count.
    pub async fn record_metric(&self, name: impl AsRef<str>) -> Result<(), IntakeError> {
        sqlx::query(
            r#"
            INSERT INTO metrics (name, cnt) VALUES (?, 1)
            ON CONFLICT(name) DO UPDATE SET cnt = cnt + 1
            "#,
        )
        .bind(name.as_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Current value of a single counter, zero if never recorded.
    pub async fn metric_count(&self, name: impl AsRef<str>) -> Result<i64, IntakeError> {
        let rec: Option<(i64,)> = sqlx::query_as("SELECT cnt FROM metrics WHERE name = ?")
            .bind(name.as_ref())
            .fetch_optional(&self.pool)
            .await?;
        Ok(rec.map(|r| r.0).unwrap_or(0))
    }

    pub async fn fetch_stats(&self) -> Result<IntakeStats, IntakeError> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM applications")
            .fetch_one(&self.pool)
            .await?;
        let counters: Vec<(String, i64)> = sqlx::query_as("SELECT name, cnt FROM metrics")
            .fetch_all(&self.pool)
            .await?;

        let mut stats = IntakeStats {
            applications_total: total.0,
            ..IntakeStats::default()
        };
        for (name, cnt) in counters {
            if name == MetricName::Success.as_str() {
                stats.success = cnt;
            } else if name == MetricName::Failed.as_str() {
                stats.failed = cnt;
            }
        }
        Ok(stats)
    }
}
