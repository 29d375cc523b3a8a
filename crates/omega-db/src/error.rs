//! Error types for statement execution.

use thiserror::Error;

/// Errors raised while executing statements.
#[derive(Debug, Error)]
pub enum DbError {
    /// Error reported by the driver, passed through unchanged.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid connection configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// `insert_many` was called without rows.
    #[error("insert requires at least one row")]
    EmptyInsert,
}

/// Result type alias for execution.
pub type Result<T> = std::result::Result<T, DbError>;
