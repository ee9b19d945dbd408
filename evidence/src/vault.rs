//! Content-addressed evidence persistence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use doppelcheck_models::VerificationResult;
use doppelcheck_store::{EvidenceBackend, KeyedLocks};
use doppelcheck_trust::{verify_links, TrustChain};
use doppelcheck_types::{Clock, Fingerprint, NormalizedSource};

use crate::record::{EvidenceRecord, RecordContent};
use crate::EvidenceError;

/// Stores and audits evidence records on one backend.
///
/// The vault owns its backend: closing the vault closes the backend, and every
/// later call fails with [`EvidenceError::Closed`].
pub struct EvidenceVault {
    backend: Arc<dyn EvidenceBackend>,
    clock: Arc<dyn Clock>,
    locks: KeyedLocks,
    closed: AtomicBool,
}

impl EvidenceVault {
    pub fn new(backend: Arc<dyn EvidenceBackend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            locks: KeyedLocks::default(),
            closed: AtomicBool::new(false),
        }
    }

    pub fn endpoint(&self) -> &str {
        self.backend.endpoint()
    }

    fn ensure_open(&self) -> Result<(), EvidenceError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(EvidenceError::Closed);
        }
        Ok(())
    }

    /// Freeze a verification into a record and persist it.
    ///
    /// Returns the record id. Storing identical content at the same instant
    /// yields the same id and does not write twice.
    pub async fn store(
        &self,
        claim: &str,
        sources: &[NormalizedSource],
        verification: &VerificationResult,
        trust_chain: &TrustChain,
    ) -> Result<Fingerprint, EvidenceError> {
        self.ensure_open()?;

        let record = RecordContent {
            claim: claim.to_string(),
            sources: sources.to_vec(),
            verification: verification.clone(),
            trust_chain: trust_chain.links().to_vec(),
            timestamp: self.clock.now(),
        }
        .seal()?;
        let bytes = record.to_bytes()?;
        let key = record.id.to_hex();

        {
            let _guard = self.locks.acquire(&key).await;
            self.backend.put(&key, &bytes).await?;
        }
        self.locks.cleanup().await;

        tracing::info!(evidence_id = %record.id, bytes = bytes.len(), "stored evidence");
        Ok(record.id)
    }

    /// Load a record by id.
    ///
    /// Bytes that no longer decode into a record are an integrity violation,
    /// not a miss.
    pub async fn retrieve(&self, id: &Fingerprint) -> Result<EvidenceRecord, EvidenceError> {
        Ok(self.load(id).await?.1)
    }

    async fn load(&self, id: &Fingerprint) -> Result<(Vec<u8>, EvidenceRecord), EvidenceError> {
        self.ensure_open()?;
        let bytes = self
            .backend
            .get(&id.to_hex())
            .await?
            .ok_or(EvidenceError::NotFound(*id))?;
        let record = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(evidence_id = %id, error = %e, "stored evidence does not decode");
            EvidenceError::IntegrityViolation {
                id: *id,
                reason: format!("undecodable record: {e}"),
            }
        })?;
        Ok((bytes, record))
    }

    /// Re-derive the fingerprint of a stored record and audit its trust chain.
    ///
    /// The stored bytes must also be exactly the encoding the vault writes, so
    /// a rewrite that decodes to the same values is still a violation.
    pub async fn verify_integrity(&self, id: &Fingerprint) -> Result<(), EvidenceError> {
        let (bytes, record) = self.load(id).await?;
        let violation = |reason: String| {
            tracing::warn!(evidence_id = %id, %reason, "evidence integrity violation");
            EvidenceError::IntegrityViolation { id: *id, reason }
        };

        if record.id != *id {
            return Err(violation(format!("record claims id {}", record.id)));
        }
        let recomputed = record.content.fingerprint()?;
        if recomputed != *id {
            return Err(violation(format!("content hashes to {recomputed}")));
        }
        if record.to_bytes()? != bytes {
            return Err(violation("stored bytes are not the canonical encoding".into()));
        }
        verify_links(&record.content.trust_chain).map_err(|e| violation(e.to_string()))?;

        tracing::debug!(evidence_id = %id, "evidence integrity verified");
        Ok(())
    }

    /// `Ok(false)` on an integrity violation; other failures are still errors.
    pub async fn check_integrity(&self, id: &Fingerprint) -> Result<bool, EvidenceError> {
        match self.verify_integrity(id).await {
            Ok(()) => Ok(true),
            Err(EvidenceError::IntegrityViolation { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Close the vault and its backend. Idempotent.
    pub async fn close(&self) -> Result<(), EvidenceError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        tracing::info!(endpoint = %self.backend.endpoint(), "closing evidence vault");
        self.backend.close().await?;
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}
