//! Chain construction.

use std::sync::Arc;

use doppelcheck_types::{Claim, Clock, NormalizedSource, SystemClock, TrustMetrics};

use crate::chain::{ChainLink, LinkData, TrustChain};
use crate::error::TrustError;
use crate::scoring::{Scorers, ScoringInput};

/// Builds and owns one session's trust chain.
pub struct TrustLedger {
    chain: TrustChain,
    scorers: Scorers,
    clock: Arc<dyn Clock>,
}

impl Default for TrustLedger {
    fn default() -> Self {
        Self::new(Scorers::default(), Arc::new(SystemClock))
    }
}

impl TrustLedger {
    pub fn new(scorers: Scorers, clock: Arc<dyn Clock>) -> Self {
        Self {
            chain: TrustChain::new(),
            scorers,
            clock,
        }
    }

    pub fn chain(&self) -> &TrustChain {
        &self.chain
    }

    /// Consume the ledger, keeping the chain.
    pub fn into_chain(self) -> TrustChain {
        self.chain
    }

    /// Recompute metrics, then append one link per claim in input order.
    ///
    /// Everything is computed before anything is committed: on error the
    /// chain and its metrics are exactly as they were before the call.
    pub fn build(
        &mut self,
        claims: &[Claim],
        sources: &[NormalizedSource],
    ) -> Result<&TrustChain, TrustError> {
        tracing::info!(claims = claims.len(), sources = sources.len(), "building trust chain");

        let metrics = self.compute_metrics(claims, sources)?;

        let mut prev_hash = self.chain.head();
        let mut staged = Vec::with_capacity(claims.len());
        for claim in claims {
            let link = ChainLink::seal(LinkData {
                claim: claim.clone(),
                sources: sources.to_vec(),
                metrics,
                prev_hash,
            })?;
            tracing::debug!(index = self.chain.len() + staged.len(), hash = %link.hash, "sealed chain link");
            prev_hash = link.hash;
            staged.push(link);
        }

        self.chain.commit(metrics, staged, self.clock.now());
        Ok(&self.chain)
    }

    fn compute_metrics(
        &self,
        claims: &[Claim],
        sources: &[NormalizedSource],
    ) -> Result<TrustMetrics, TrustError> {
        let input = ScoringInput { claims, sources };
        let mut values = [0.0f64; 4];
        for (slot, (metric, scorer)) in values.iter_mut().zip(self.scorers.named()) {
            let value = scorer
                .score(&input)
                .map_err(|e| TrustError::MetricComputation {
                    metric,
                    reason: e.to_string(),
                })?;
            *slot = value;
        }
        TrustMetrics::new(values[0], values[1], values[2], values[3]).map_err(|e| {
            let metric = match &e {
                doppelcheck_types::TypesError::MetricOutOfRange { metric, .. } => *metric,
                _ => "unknown",
            };
            TrustError::MetricComputation {
                metric,
                reason: e.to_string(),
            }
        })
    }
}
