//! # Store Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Propagation                                  │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error) / serde_json::Error                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds the collection context                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller surfaces an advisory message; only RestoreRejected blocks      │
//! │  an action outright (a backup that fails to parse must not touch       │
//! │  any collection)                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored collection payload did not parse as its expected shape.
    ///
    /// ## When This Occurs
    /// - Hand-edited database file
    /// - A newer schema wrote a shape this build doesn't know
    #[error("Corrupt payload for collection '{collection}': {detail}")]
    CorruptPayload { collection: String, detail: String },

    /// A backup payload was rejected before any collection was touched.
    ///
    /// This is the one blocking failure in the store: restore is
    /// all-or-nothing at the parse level.
    #[error("Restore rejected: {0}")]
    RestoreRejected(String),

    /// Internal storage error.
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a CorruptPayload error for a collection.
    pub fn corrupt(collection: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        StoreError::CorruptPayload {
            collection: collection.into(),
            detail: detail.to_string(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                StoreError::ConnectionFailed("connection pool exhausted".to_string())
            }
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("pool is closed".to_string()),
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),
            other => StoreError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
