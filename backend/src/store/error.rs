//! Error types for session store operations.

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Data validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<String> for StoreError {
    fn from(s: String) -> Self {
        StoreError::InternalError(s)
    }
}

impl From<&str> for StoreError {
    fn from(s: &str) -> Self {
        StoreError::InternalError(s.to_string())
    }
}
