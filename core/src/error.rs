//! Error types for todo stores.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the HTTP layer maps it to 404,
//! while every engine-side failure becomes a 500. Deleting an absent id is not
//! an error at all; `TodoStore::delete` reports it through its `bool`.

use thiserror::Error;

use crate::types::TodoId;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by `TodoStore` implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for the requested id.
    #[error("Todo with id {id} not found")]
    NotFound { id: TodoId },

    /// The SQLite engine rejected or failed the statement.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A blocking task panicked, was cancelled, or found its mutex poisoned.
    #[error("background task failed: {0}")]
    TaskJoin(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskJoin(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_id() {
        let err = StoreError::NotFound { id: 42 };
        assert_eq!(err.to_string(), "Todo with id 42 not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn sqlite_errors_are_not_not_found() {
        let err = StoreError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(!err.is_not_found());
        assert!(err.to_string().starts_with("sqlite error"));
    }
}
