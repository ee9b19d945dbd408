use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("blocking task failed: {0}")]
    Task(String),
}

impl From<heed::Error> for LmdbError {
    fn from(e: heed::Error) -> Self {
        LmdbError::Heed(e.to_string())
    }
}

impl From<std::io::Error> for LmdbError {
    fn from(e: std::io::Error) -> Self {
        LmdbError::Io(e.to_string())
    }
}

impl From<tokio::task::JoinError> for LmdbError {
    fn from(e: tokio::task::JoinError) -> Self {
        LmdbError::Task(e.to_string())
    }
}

impl From<LmdbError> for doppelcheck_store::StoreError {
    fn from(e: LmdbError) -> Self {
        match e {
            LmdbError::Io(msg) => doppelcheck_store::StoreError::Unavailable(msg),
            other => doppelcheck_store::StoreError::Backend(other.to_string()),
        }
    }
}
