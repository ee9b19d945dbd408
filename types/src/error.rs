//! Error classification shared across crates.

use thiserror::Error;

/// Coarse class of a failure, used to decide whether anything may retry it.
///
/// Every component error exposes a `class()` returning one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Bad model identifier, bad endpoint. Fatal, never retried.
    Configuration,
    /// Malformed input or output shape.
    Validation,
    /// Provider timeout, provider or persistence unavailable.
    Infrastructure,
    /// Tampering or corruption detected. Always fatal.
    Integrity,
    /// Duplicate in-flight request or cancellation.
    Concurrency,
}

impl ErrorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::Configuration => "configuration",
            ErrorClass::Validation => "validation",
            ErrorClass::Infrastructure => "infrastructure",
            ErrorClass::Integrity => "integrity",
            ErrorClass::Concurrency => "concurrency",
        }
    }

    /// Whether an adapter (never the core) may retry an error of this class.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorClass::Infrastructure)
    }
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while constructing core values.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TypesError {
    #[error("metric {metric} out of range [0, 1]: {value}")]
    MetricOutOfRange { metric: &'static str, value: f64 },

    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

impl TypesError {
    pub fn class(&self) -> ErrorClass {
        ErrorClass::Validation
    }
}
