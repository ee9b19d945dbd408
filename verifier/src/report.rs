use doppelcheck_models::VerificationResult;
use doppelcheck_types::{Fingerprint, NormalizedSource, Timestamp};
use serde::{Deserialize, Serialize};

/// Outcome of a successful verification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub claim: String,
    pub verification: VerificationResult,
    pub trust_score: f64,
    /// `trust_score` reached the configured threshold.
    pub trusted: bool,
    /// Id of the stored evidence record.
    pub evidence_id: Fingerprint,
    /// The sources that passed normalization.
    pub sources: Vec<NormalizedSource>,
    pub timestamp: Timestamp,
}
