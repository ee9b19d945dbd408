//! Evidence record layout.

use doppelcheck_crypto::hash_canonical;
use doppelcheck_models::VerificationResult;
use doppelcheck_trust::ChainLink;
use doppelcheck_types::{Fingerprint, NormalizedSource, Timestamp};
use serde::{Deserialize, Serialize};

use crate::EvidenceError;

/// Everything in a record except its id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordContent {
    pub claim: String,
    pub sources: Vec<NormalizedSource>,
    pub verification: VerificationResult,
    pub trust_chain: Vec<ChainLink>,
    pub timestamp: Timestamp,
}

impl RecordContent {
    /// `SHA-256(canonical(self))`.
    pub fn fingerprint(&self) -> Result<Fingerprint, EvidenceError> {
        Ok(hash_canonical(self)?)
    }

    /// Compute the fingerprint and attach it as the id.
    pub fn seal(self) -> Result<EvidenceRecord, EvidenceError> {
        let id = self.fingerprint()?;
        Ok(EvidenceRecord { id, content: self })
    }
}

/// A stored verification, serialized flat:
/// `{id, claim, sources, verification, trust_chain, timestamp}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    pub id: Fingerprint,
    #[serde(flatten)]
    pub content: RecordContent,
}

impl EvidenceRecord {
    pub fn to_bytes(&self) -> Result<Vec<u8>, EvidenceError> {
        serde_json::to_vec(self).map_err(|e| EvidenceError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> RecordContent {
        RecordContent {
            claim: "The sky is blue".into(),
            sources: vec![],
            verification: VerificationResult::new("verified", 0.95, vec![]),
            trust_chain: vec![],
            timestamp: Timestamp::from_secs(1_767_225_600),
        }
    }

    #[test]
    fn id_excludes_itself() {
        let record = content().seal().unwrap();
        assert_eq!(record.id, record.content.fingerprint().unwrap());
    }

    #[test]
    fn timestamp_changes_fingerprint() {
        let a = content();
        let mut b = content();
        b.timestamp = Timestamp::from_secs(1_767_225_601);
        assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }

    #[test]
    fn serializes_flat() {
        let record = content().seal().unwrap();
        let json = serde_json::to_value(&record).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["claim", "id", "sources", "timestamp", "trust_chain", "verification"]
        );
        assert_eq!(json["timestamp"], "2026-01-01T00:00:00.000000Z");
    }
}
