//! Database access layer with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `uploads` - Ledger analysis history
//! - `predictions` - Funding prediction history

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::debug;

use crate::error::Result;

mod predictions;
mod uploads;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Page size for history listings when none is given
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Largest page a history listing returns
pub const MAX_HISTORY_LIMIT: usize = 1000;

/// Clamp a requested history page size to `1..=MAX_HISTORY_LIMIT`
pub fn clamp_limit(limit: Option<usize>) -> usize {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

/// Parse a SQLite datetime string into a DateTime<Utc>
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    // SQLite stores as "YYYY-MM-DD HH:MM:SS" format
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (or create) the database at `path` and run migrations
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        debug!(path, "Database ready");
        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Uses a temporary file rather than `:memory:` so every pooled
    /// connection sees the same data.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "finease_test_{}_{}.db",
            std::process::id(),
            id
        ));

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path.to_string_lossy())
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block the writer
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            -- One row per analyzed ledger
            CREATE TABLE IF NOT EXISTS ledger_uploads (
                id INTEGER PRIMARY KEY,
                rows_processed INTEGER NOT NULL,
                total_income REAL NOT NULL,
                total_expense REAL NOT NULL,
                total_donations REAL NOT NULL,
                surplus_or_deficit REAL NOT NULL,
                stability_score INTEGER NOT NULL,
                anomaly_count INTEGER NOT NULL DEFAULT 0,
                uploaded_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            -- One row per funding prediction
            CREATE TABLE IF NOT EXISTS predictions (
                id INTEGER PRIMARY KEY,
                income REAL NOT NULL,
                expense REAL NOT NULL,
                donations REAL NOT NULL,
                future_funding_required REAL NOT NULL,
                confidence_score REAL NOT NULL,
                risk_level TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_predictions_risk ON predictions(risk_level);
            "#,
        )?;

        Ok(())
    }
}
