//! Persistence for the sales board.
//!
//! # Tables
//!
//! - `product` - Cleaned sales rows, append-only
//! - `app_user` - Login names and password hashes
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p salesboard-cli -- migrate
//! ```
//!
//! Handlers never touch the pool directly. They go through the
//! [`ProductStore`] and [`UserStore`] traits so the router can run over the
//! in-memory [`MemoryStore`] in tests.

pub mod memory;
pub mod products;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use salesboard_core::{ProductRecord, Username};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::models::User;

pub use memory::MemoryStore;
pub use products::PgProductStore;
pub use users::PgUserStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Durable storage for cleaned product records.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Append a batch of records.
    ///
    /// The batch is written atomically: either every record is stored or
    /// none is. Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    async fn append(&self, records: &[ProductRecord]) -> Result<u64, RepositoryError>;

    /// Every stored record, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the read fails.
    async fn read_all(&self) -> Result<Vec<ProductRecord>, RepositoryError>;

    /// Check that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the store cannot be reached.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Storage for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user with an already hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn create(&self, username: &Username, password_hash: &str)
    -> Result<User, RepositoryError>;

    /// Look up a user by exact username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-constraint violation to `RepositoryError::Conflict`.
pub(crate) fn conflict_on_unique(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(err)
}
