use thiserror::Error;

/// Input rejected by the caller before it reaches the store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("todo description must not be empty")]
    EmptyText,

    #[error("invalid time of day {0:?}, expected HH:MM")]
    InvalidTime(String),

    #[error("invalid duration part {0:?}")]
    InvalidDuration(String),
}

/// Failure talking to the durable key-value slot.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}
