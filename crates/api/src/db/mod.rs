//! Store capability interface and its engines.
//!
//! Handlers and services never see a concrete database. They talk to a
//! [`Store`], which is the union of three narrow per-resource traits:
//!
//! - [`CustomerStore`] - `customers` table
//! - [`CakeStore`] - `cakes` table
//! - [`OrderStore`] - `orders` table
//!
//! Two engines implement it:
//!
//! - [`PgStore`] - `PostgreSQL` via sqlx
//! - [`MemoryStore`] - process-local tables for tests and local runs
//!
//! Both engines enforce the same constraints as the SQL schema (unique
//! email, unique cake name, order references, restricted deletes) and report
//! violations as [`RepositoryError::Conflict`] or
//! [`RepositoryError::ReferenceViolation`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p confectionery-cli -- migrate
//! ```

pub mod cakes;
pub mod customers;
pub mod memory;
pub mod orders;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use cakes::CakeStore;
pub use customers::CustomerStore;
pub use memory::MemoryStore;
pub use orders::OrderStore;

use crate::config::DatabaseConfig;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Unique constraint violation (e.g., duplicate email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Foreign key violation: a referenced row is missing, or a row is
    /// still referenced and cannot be removed.
    #[error("reference violation: {0}")]
    ReferenceViolation(String),
}

impl RepositoryError {
    /// Classify a sqlx error raised by a write.
    ///
    /// Unique and foreign key violations become [`Self::Conflict`] and
    /// [`Self::ReferenceViolation`], carrying the constraint name.
    #[must_use]
    pub fn from_write(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            let constraint = db_err.constraint().unwrap_or("unknown").to_owned();
            if db_err.is_unique_violation() {
                return Self::Conflict(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return Self::ReferenceViolation(constraint);
            }
        }
        Self::Database(e)
    }
}

/// Full store capability used by the API.
#[async_trait]
pub trait Store: CustomerStore + CakeStore + OrderStore {
    /// Check that the backing engine is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the engine cannot be reached.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// `PostgreSQL` store backed by a connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(config.url.expose_secret())
        .await
}
