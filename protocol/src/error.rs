use doppelcheck_types::ErrorClass;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("claim text is empty")]
    EmptyClaim,

    #[error("claim extraction failed: {0}")]
    Extraction(String),
}

impl ProtocolError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ProtocolError::EmptyClaim => ErrorClass::Validation,
            ProtocolError::Extraction(_) => ErrorClass::Infrastructure,
        }
    }
}
