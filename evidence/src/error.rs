use doppelcheck_store::StoreError;
use doppelcheck_types::{ErrorClass, Fingerprint};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum EvidenceError {
    #[error("no evidence record {0}")]
    NotFound(Fingerprint),

    #[error("evidence record {id} failed integrity check: {reason}")]
    IntegrityViolation { id: Fingerprint, reason: String },

    #[error("evidence storage error: {0}")]
    Store(#[from] StoreError),

    #[error("evidence record could not be serialized: {0}")]
    Serialization(String),

    #[error("evidence vault is closed")]
    Closed,
}

impl EvidenceError {
    pub fn class(&self) -> ErrorClass {
        match self {
            EvidenceError::IntegrityViolation { .. } => ErrorClass::Integrity,
            EvidenceError::Store(e) => e.class(),
            EvidenceError::Serialization(_) => ErrorClass::Validation,
            EvidenceError::NotFound(_) | EvidenceError::Closed => ErrorClass::Infrastructure,
        }
    }

    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, EvidenceError::IntegrityViolation { .. })
    }
}

impl From<doppelcheck_crypto::CanonicalError> for EvidenceError {
    fn from(e: doppelcheck_crypto::CanonicalError) -> Self {
        EvidenceError::Serialization(e.to_string())
    }
}
