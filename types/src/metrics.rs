//! Trust metrics: four bounded scores in [0, 1].
//!
//! A `TrustMetrics` value is immutable. Each ledger build computes a fresh value
//! and replaces the previous snapshot wholesale, so a partially updated set of
//! metrics is never observable.

use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// Scale used for the fixed-point form of a metric (millionths).
pub const METRIC_SCALE: i64 = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedMetrics")]
pub struct TrustMetrics {
    source_reliability: f64,
    claim_consistency: f64,
    evidence_quality: f64,
    verification_confidence: f64,
}

#[derive(Deserialize)]
struct UncheckedMetrics {
    source_reliability: f64,
    claim_consistency: f64,
    evidence_quality: f64,
    verification_confidence: f64,
}

impl TryFrom<UncheckedMetrics> for TrustMetrics {
    type Error = TypesError;

    fn try_from(m: UncheckedMetrics) -> Result<Self, Self::Error> {
        TrustMetrics::new(
            m.source_reliability,
            m.claim_consistency,
            m.evidence_quality,
            m.verification_confidence,
        )
    }
}

/// Reject NaN, infinities and anything outside [0, 1].
pub fn check_unit_interval(metric: &'static str, value: f64) -> Result<f64, TypesError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(TypesError::MetricOutOfRange { metric, value })
    }
}

impl TrustMetrics {
    /// All four metrics at zero, the state before the first build.
    pub const ZERO: Self = Self {
        source_reliability: 0.0,
        claim_consistency: 0.0,
        evidence_quality: 0.0,
        verification_confidence: 0.0,
    };

    pub fn new(
        source_reliability: f64,
        claim_consistency: f64,
        evidence_quality: f64,
        verification_confidence: f64,
    ) -> Result<Self, TypesError> {
        Ok(Self {
            source_reliability: check_unit_interval("source_reliability", source_reliability)?,
            claim_consistency: check_unit_interval("claim_consistency", claim_consistency)?,
            evidence_quality: check_unit_interval("evidence_quality", evidence_quality)?,
            verification_confidence: check_unit_interval(
                "verification_confidence",
                verification_confidence,
            )?,
        })
    }

    pub fn source_reliability(&self) -> f64 {
        self.source_reliability
    }

    pub fn claim_consistency(&self) -> f64 {
        self.claim_consistency
    }

    pub fn evidence_quality(&self) -> f64 {
        self.evidence_quality
    }

    pub fn verification_confidence(&self) -> f64 {
        self.verification_confidence
    }

    /// Metrics in fixed order, paired with their names.
    pub fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("source_reliability", self.source_reliability),
            ("claim_consistency", self.claim_consistency),
            ("evidence_quality", self.evidence_quality),
            ("verification_confidence", self.verification_confidence),
        ]
    }

    /// Convert a metric to millionths, rounding to nearest.
    pub fn to_fixed(value: f64) -> i64 {
        (value * METRIC_SCALE as f64).round() as i64
    }
}

impl Default for TrustMetrics {
    fn default() -> Self {
        Self::ZERO
    }
}
