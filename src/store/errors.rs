//! Store error types

use thiserror::Error;

use crate::model::BookId;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row carries the requested id
    #[error("Book {0} not found")]
    NotFound(BookId),

    /// SQLite rejected the statement or is unreachable
    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Blocking task running the statement panicked or was cancelled
    #[error("storage worker failed: {0}")]
    Worker(String),

    /// A previous holder of the connection panicked
    #[error("connection lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::Worker(err.to_string())
    }
}
