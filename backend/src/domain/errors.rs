use thiserror::Error;

/// Failures surfaced by the entry and report services
#[derive(Debug, Error)]
pub enum EntryError {
    /// Input was missing, malformed or out of range; never retried
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("entry '{0}' not found")]
    NotFound(String),
    /// The backing store could not complete the call
    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

impl EntryError {
    pub fn validation(message: impl Into<String>) -> Self {
        EntryError::Validation(message.into())
    }
}

pub type EntryResult<T> = std::result::Result<T, EntryError>;
