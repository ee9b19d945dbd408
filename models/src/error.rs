use doppelcheck_types::ErrorClass;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("invalid model identifier '{0}': expected local:<name> or cloud:<name>")]
    InvalidModelIdentifier(String),

    #[error("missing credentials: environment variable {0} is not set")]
    MissingCredentials(String),

    #[error("model output is missing required field '{field}'")]
    IncompleteModelOutput { field: &'static str },

    #[error("model output is malformed: {0}")]
    MalformedModelOutput(String),

    #[error("provider {provider} did not answer within {after_ms} ms")]
    ProviderTimeout { provider: String, after_ms: u64 },

    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("provider rejected the request (HTTP {status}): {message}")]
    ProviderRejected { status: u16, message: String },
}

impl ModelError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ModelError::InvalidModelIdentifier(_) | ModelError::MissingCredentials(_) => {
                ErrorClass::Configuration
            }
            ModelError::IncompleteModelOutput { .. }
            | ModelError::MalformedModelOutput(_)
            | ModelError::ProviderRejected { .. } => ErrorClass::Validation,
            ModelError::ProviderTimeout { .. } | ModelError::ProviderUnavailable(_) => {
                ErrorClass::Infrastructure
            }
        }
    }
}
