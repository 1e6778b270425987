use thiserror::Error;

/// Storage-layer error taxonomy. Validation and NotFound surface as client
/// errors at the HTTP boundary; Storage and LockPoisoned as server errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("connection lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        StoreError::Validation(msg.into())
    }
}
