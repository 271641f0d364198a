//! Database Module
//!
//! Owns the SQLite connection pool and the one way the rest of the backend
//! runs a multi-statement write: [`Database::transaction`].
//!
//! # Transactions
//!
//! The closure passed to `transaction` receives the open connection and
//! returns a boxed future. On `Ok` the transaction commits; on `Err` it is
//! dropped, which rolls it back. Lock conflicts (`SQLITE_BUSY`/`SQLITE_LOCKED`)
//! re-run the closure from scratch according to the [`RetryPolicy`]; once the
//! budget is spent the caller gets `BackendError::Conflict`.
//!
//! Because the closure may run more than once it is `FnMut`: clone owned
//! inputs inside it before moving them into the `async move` block.
//!
//! ```rust,no_run
//! use sitebuilder::backend::db::Database;
//!
//! # async fn example(db: Database, name: String) -> Result<(), sitebuilder::backend::error::BackendError> {
//! db.transaction("rename", move |conn| {
//!     let name = name.clone();
//!     Box::pin(async move {
//!         sqlx::query("UPDATE websites SET name = ?").bind(name).execute(&mut *conn).await?;
//!         Ok(())
//!     })
//! })
//! .await
//! # }
//! ```

pub mod retry;

use std::str::FromStr;

use futures_util::future::BoxFuture;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{SqliteConnection, SqlitePool};

use crate::backend::error::BackendError;

pub use retry::RetryPolicy;

/// Connection pool plus retry policy
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    retry: RetryPolicy,
}

impl Database {
    /// Wrap an existing pool
    pub fn new(pool: SqlitePool, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }

    /// Open (creating if needed) the database at `url`
    ///
    /// # Arguments
    /// * `url` - SQLite URL, e.g. `sqlite://sitebuilder.db?mode=rwc`
    /// * `max_connections` - Pool size
    /// * `retry` - Conflict retry policy
    pub async fn connect(url: &str, max_connections: u32, retry: RetryPolicy) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool, retry))
    }

    /// A private in-memory database with the schema applied
    ///
    /// Every in-memory SQLite connection is its own database, so the pool
    /// holds exactly one connection that is never recycled.
    pub async fn in_memory() -> Result<Self, BackendError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self::new(pool, RetryPolicy::default());
        db.migrate().await?;
        Ok(db)
    }

    /// Apply the embedded migrations in `migrations/`
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }

    /// Connection pool for single-statement reads and writes
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Run `work` inside one transaction, retrying on lock conflicts
    ///
    /// # Arguments
    /// * `label` - Operation name used in logs
    /// * `work` - Body of the transaction; may be invoked more than once
    ///
    /// # Returns
    /// The body's value once committed, the body's error (after rollback),
    /// or `Conflict` when every attempt lost a lock race
    pub async fn transaction<T, F>(&self, label: &'static str, mut work: F) -> Result<T, BackendError>
    where
        T: Send,
        F: for<'c> FnMut(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, BackendError>> + Send,
    {
        let mut attempt = 1;
        loop {
            match self.run_once(&mut work).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && self.retry.allows_retry(attempt) => {
                    let delay = self.retry.delay_after(attempt);
                    tracing::warn!(
                        "Transaction '{}' conflicted on attempt {}/{}; retrying in {:?}",
                        label,
                        attempt,
                        self.retry.max_attempts,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) if err.is_retryable() => {
                    tracing::error!(
                        "Transaction '{}' still conflicting after {} attempts: {}",
                        label,
                        attempt,
                        err
                    );
                    return Err(BackendError::conflict(
                        "The data was being modified concurrently; please retry",
                    ));
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn run_once<T, F>(&self, work: &mut F) -> Result<T, BackendError>
    where
        T: Send,
        F: for<'c> FnMut(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, BackendError>> + Send,
    {
        let mut tx = self.pool.begin().await?;
        let value = work(&mut *tx).await?;
        tx.commit().await?;
        Ok(value)
    }
}
