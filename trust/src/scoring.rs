//! Pluggable metric scorers.
//!
//! A scorer is a pure function of the current claims and sources returning a
//! value in [0, 1]. The ledger validates every output; a scorer never gets to
//! write a metric directly.

use std::fmt;
use std::sync::Arc;

use doppelcheck_types::{Claim, NormalizedSource};
use thiserror::Error;

/// What a scorer may look at.
#[derive(Clone, Copy, Debug)]
pub struct ScoringInput<'a> {
    pub claims: &'a [Claim],
    pub sources: &'a [NormalizedSource],
}

/// Failure reported by a scorer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ScoringError(pub String);

/// Computes one trust metric.
pub trait MetricScorer: Send + Sync {
    fn score(&self, input: &ScoringInput<'_>) -> Result<f64, ScoringError>;
}

/// Always returns the same value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantScorer(pub f64);

impl MetricScorer for ConstantScorer {
    fn score(&self, _input: &ScoringInput<'_>) -> Result<f64, ScoringError> {
        Ok(self.0)
    }
}

/// Adapts a closure into a [`MetricScorer`].
pub struct FnScorer<F>(F);

impl<F> MetricScorer for FnScorer<F>
where
    F: Fn(&ScoringInput<'_>) -> Result<f64, ScoringError> + Send + Sync,
{
    fn score(&self, input: &ScoringInput<'_>) -> Result<f64, ScoringError> {
        (self.0)(input)
    }
}

pub fn scorer_fn<F>(f: F) -> FnScorer<F>
where
    F: Fn(&ScoringInput<'_>) -> Result<f64, ScoringError> + Send + Sync,
{
    FnScorer(f)
}

/// One scorer per metric.
#[derive(Clone)]
pub struct Scorers {
    pub source_reliability: Arc<dyn MetricScorer>,
    pub claim_consistency: Arc<dyn MetricScorer>,
    pub evidence_quality: Arc<dyn MetricScorer>,
    pub verification_confidence: Arc<dyn MetricScorer>,
}

impl Scorers {
    pub fn with_source_reliability(mut self, scorer: impl MetricScorer + 'static) -> Self {
        self.source_reliability = Arc::new(scorer);
        self
    }

    pub fn with_claim_consistency(mut self, scorer: impl MetricScorer + 'static) -> Self {
        self.claim_consistency = Arc::new(scorer);
        self
    }

    pub fn with_evidence_quality(mut self, scorer: impl MetricScorer + 'static) -> Self {
        self.evidence_quality = Arc::new(scorer);
        self
    }

    pub fn with_verification_confidence(mut self, scorer: impl MetricScorer + 'static) -> Self {
        self.verification_confidence = Arc::new(scorer);
        self
    }

    /// Scorers paired with their metric names, in `TrustMetrics::named` order.
    pub(crate) fn named(&self) -> [(&'static str, &dyn MetricScorer); 4] {
        [
            ("source_reliability", self.source_reliability.as_ref()),
            ("claim_consistency", self.claim_consistency.as_ref()),
            ("evidence_quality", self.evidence_quality.as_ref()),
            ("verification_confidence", self.verification_confidence.as_ref()),
        ]
    }
}

impl Default for Scorers {
    /// Constant placeholders: 0.9 / 0.85 / 0.9, with verification confidence
    /// left at 0.0 until model confidence is wired in.
    fn default() -> Self {
        Self {
            source_reliability: Arc::new(ConstantScorer(0.9)),
            claim_consistency: Arc::new(ConstantScorer(0.85)),
            evidence_quality: Arc::new(ConstantScorer(0.9)),
            verification_confidence: Arc::new(ConstantScorer(0.0)),
        }
    }
}

impl fmt::Debug for Scorers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scorers").finish_non_exhaustive()
    }
}
