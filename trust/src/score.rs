//! Weighted trust score.
//!
//! Computed in fixed point so the result is exact and identical everywhere:
//! metrics in millionths, weights in hundredths, rounded half-to-even at two
//! decimals.

use doppelcheck_types::TrustMetrics;

/// Metric weights in hundredths, in `TrustMetrics::named` order. Sum to 100.
pub const WEIGHTS: [(&str, i64); 4] = [
    ("source_reliability", 30),
    ("claim_consistency", 30),
    ("evidence_quality", 20),
    ("verification_confidence", 20),
];

/// `round(Σ weight_m * metric_m, 2)`, always within [0, 1].
pub fn trust_score(metrics: &TrustMetrics) -> f64 {
    // Units of 1e-8: hundredths times millionths.
    let sum: i64 = metrics
        .named()
        .iter()
        .zip(WEIGHTS.iter())
        .map(|((_, value), (_, weight))| weight * TrustMetrics::to_fixed(*value))
        .sum();

    let divisor = 1_000_000;
    let mut cents = sum / divisor;
    let rem = sum % divisor;
    if rem > divisor / 2 || (rem == divisor / 2 && cents % 2 == 1) {
        cents += 1;
    }
    cents as f64 / 100.0
}
