use doppelcheck_evidence::EvidenceError;
use doppelcheck_models::ModelError;
use doppelcheck_protocol::ProtocolError;
use doppelcheck_store::StoreError;
use doppelcheck_trust::TrustError;
use doppelcheck_types::{ErrorClass, Fingerprint};
use thiserror::Error;

use crate::state::{InvalidTransition, VerificationPhase};

/// Errors building a [`Verifier`](crate::Verifier) from configuration.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum VerifierError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Evidence(#[from] EvidenceError),
}

impl VerifierError {
    pub fn class(&self) -> ErrorClass {
        match self {
            VerifierError::Config(_) => ErrorClass::Configuration,
            VerifierError::Model(e) => e.class(),
            VerifierError::Store(e) => e.class(),
            VerifierError::Evidence(e) => e.class(),
        }
    }
}

/// What went wrong inside a stage.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum StageError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Trust(#[from] TrustError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Evidence(#[from] EvidenceError),

    #[error("request could not be fingerprinted: {0}")]
    Fingerprint(String),

    #[error("an identical request {0} is already in flight")]
    DuplicateInFlight(Fingerprint),

    #[error("the in-flight request {0} was cancelled")]
    Cancelled(Fingerprint),

    #[error("illegal phase change {0}")]
    Transition(#[from] InvalidTransition),
}

impl StageError {
    pub fn class(&self) -> ErrorClass {
        match self {
            StageError::Protocol(e) => e.class(),
            StageError::Trust(e) => e.class(),
            StageError::Model(e) => e.class(),
            StageError::Evidence(e) => e.class(),
            StageError::Fingerprint(_) => ErrorClass::Validation,
            StageError::DuplicateInFlight(_) | StageError::Cancelled(_) => ErrorClass::Concurrency,
            StageError::Transition(_) => ErrorClass::Integrity,
        }
    }
}

/// A failed verification: the phase it failed in and why.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("verification failed during {stage}: {cause}")]
pub struct PipelineError {
    pub stage: VerificationPhase,
    pub cause: StageError,
}

impl PipelineError {
    pub fn new(stage: VerificationPhase, cause: impl Into<StageError>) -> Self {
        Self {
            stage,
            cause: cause.into(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        self.cause.class()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_stage() {
        let err = PipelineError::new(
            VerificationPhase::ModelVerify,
            ModelError::ProviderTimeout {
                provider: "local:mistral".into(),
                after_ms: 10,
            },
        );
        assert_eq!(
            err.to_string(),
            "verification failed during model_verify: provider local:mistral did not answer within 10 ms"
        );
        assert_eq!(err.class(), ErrorClass::Infrastructure);
    }

    #[test]
    fn concurrency_class() {
        let err = PipelineError::new(
            VerificationPhase::Queued,
            StageError::DuplicateInFlight(Fingerprint::ZERO),
        );
        assert_eq!(err.class(), ErrorClass::Concurrency);
    }
}
