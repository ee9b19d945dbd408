//! Pipeline phase tracking.

use std::fmt;

use doppelcheck_types::Fingerprint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a verification request is in the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPhase {
    /// Admitted, nothing run yet.
    Queued,
    Extracting,
    Normalizing,
    LedgerBuild,
    ModelVerify,
    EvidenceStore,
    Done,
    Failed,
}

impl VerificationPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationPhase::Queued => "queued",
            VerificationPhase::Extracting => "extracting",
            VerificationPhase::Normalizing => "normalizing",
            VerificationPhase::LedgerBuild => "ledger_build",
            VerificationPhase::ModelVerify => "model_verify",
            VerificationPhase::EvidenceStore => "evidence_store",
            VerificationPhase::Done => "done",
            VerificationPhase::Failed => "failed",
        }
    }

    /// The phase that follows on success. `None` for terminal phases.
    pub fn next(&self) -> Option<VerificationPhase> {
        use VerificationPhase::*;
        match self {
            Queued => Some(Extracting),
            Extracting => Some(Normalizing),
            Normalizing => Some(LedgerBuild),
            LedgerBuild => Some(ModelVerify),
            ModelVerify => Some(EvidenceStore),
            EvidenceStore => Some(Done),
            Done | Failed => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, VerificationPhase::Done | VerificationPhase::Failed)
    }
}

impl fmt::Display for VerificationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Refused phase change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{from} -> {to}")]
pub struct InvalidTransition {
    pub from: VerificationPhase,
    pub to: VerificationPhase,
}

/// State of one request moving through the pipeline.
///
/// Phases only move forward, one step at a time. A finished run accepts no
/// further transitions.
#[derive(Clone, Debug)]
pub struct PipelineRun {
    request: Fingerprint,
    phase: VerificationPhase,
    completed: Vec<VerificationPhase>,
}

impl PipelineRun {
    pub fn new(request: Fingerprint) -> Self {
        Self {
            request,
            phase: VerificationPhase::Queued,
            completed: Vec::new(),
        }
    }

    pub fn request(&self) -> &Fingerprint {
        &self.request
    }

    pub fn phase(&self) -> VerificationPhase {
        self.phase
    }

    /// Phases finished so far, in order.
    pub fn completed(&self) -> &[VerificationPhase] {
        &self.completed
    }

    /// Finish the current phase and enter `next`.
    pub fn advance(&mut self, next: VerificationPhase) -> Result<(), InvalidTransition> {
        let invalid = InvalidTransition {
            from: self.phase,
            to: next,
        };
        if self.phase.next() != Some(next) || self.completed.contains(&next) {
            return Err(invalid);
        }
        self.completed.push(self.phase);
        tracing::info!(from = %self.phase, to = %next, "pipeline phase");
        self.phase = next;
        Ok(())
    }

    /// Mark the run failed. Returns the phase that failed.
    pub fn fail(&mut self) -> VerificationPhase {
        let failed = self.phase;
        if !self.phase.is_terminal() {
            tracing::warn!(phase = %failed, "pipeline failed");
            self.phase = VerificationPhase::Failed;
        }
        failed
    }
}
