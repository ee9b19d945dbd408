//! Trust ledger errors.

use doppelcheck_types::ErrorClass;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum TrustError {
    #[error("metric {metric} could not be computed: {reason}")]
    MetricComputation { metric: &'static str, reason: String },

    #[error("chain link {index} does not reference its predecessor")]
    BrokenLink { index: usize },

    #[error("chain link {index} hash does not match its content")]
    HashMismatch { index: usize },

    #[error("chain link could not be serialized: {0}")]
    Serialization(String),
}

impl TrustError {
    pub fn class(&self) -> ErrorClass {
        match self {
            TrustError::MetricComputation { .. } => ErrorClass::Validation,
            TrustError::BrokenLink { .. } | TrustError::HashMismatch { .. } => {
                ErrorClass::Integrity
            }
            TrustError::Serialization(_) => ErrorClass::Validation,
        }
    }
}

impl From<doppelcheck_crypto::CanonicalError> for TrustError {
    fn from(e: doppelcheck_crypto::CanonicalError) -> Self {
        TrustError::Serialization(e.to_string())
    }
}
