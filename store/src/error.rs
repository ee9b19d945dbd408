use doppelcheck_types::ErrorClass;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("key not found: {0}")]
    NotFound(String),

    #[error("key {0} already holds different content")]
    Duplicate(String),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("database is corrupted: {0}")]
    Corruption(String),

    #[error("invalid storage endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("storage backend is closed")]
    Closed,
}

impl StoreError {
    pub fn class(&self) -> ErrorClass {
        match self {
            StoreError::InvalidEndpoint(_) => ErrorClass::Configuration,
            StoreError::Duplicate(_) | StoreError::Corruption(_) => ErrorClass::Integrity,
            StoreError::Serialization(_) => ErrorClass::Validation,
            StoreError::NotFound(_)
            | StoreError::Backend(_)
            | StoreError::Unavailable(_)
            | StoreError::Closed => ErrorClass::Infrastructure,
        }
    }
}
