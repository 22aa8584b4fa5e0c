//! Errors surfaced by repository implementations.

use thiserror::Error;

/// Result type returned by repository contracts.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository-level error.
///
/// These are persistence failures, never business-rule violations. Domain
/// crates keep their own error enums for the latter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A conditional write lost against a concurrent writer, or a uniqueness
    /// constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backing store failed (connection, lock poisoning, corrupt row, ...).
    #[error("storage failure: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
