//! SQLite connection pool wrapper for the storage crate.

use std::str::FromStr;

use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use tracing::info;

/// Manages a single SQLite pool; creates DB file if missing.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database URL (`sqlite:site.db`, `sqlite:///abs/path.db`).
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        info!(database_url = %database_url, "Initializing SQLite pool");

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
