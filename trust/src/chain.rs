//! Hash-linked chain of verification links.

use doppelcheck_crypto::{genesis_hash, hash_canonical};
use doppelcheck_types::{Claim, Hash256, NormalizedSource, Timestamp, TrustMetrics};
use serde::{Deserialize, Serialize};

use crate::error::TrustError;
use crate::score::trust_score;

/// The hashed content of a link.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkData {
    pub claim: Claim,
    pub sources: Vec<NormalizedSource>,
    /// Copy of the metrics at the moment the link was sealed.
    pub metrics: TrustMetrics,
    pub prev_hash: Hash256,
}

impl LinkData {
    /// `SHA-256(canonical(data))`.
    pub fn compute_hash(&self) -> Result<Hash256, TrustError> {
        Ok(hash_canonical(self)?)
    }
}

/// One sealed entry. Immutable once appended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainLink {
    pub data: LinkData,
    pub hash: Hash256,
}

impl ChainLink {
    /// Seal `data` by hashing it.
    pub fn seal(data: LinkData) -> Result<Self, TrustError> {
        let hash = data.compute_hash()?;
        Ok(Self { data, hash })
    }
}

/// Check every hash and every back-reference of a detached chain.
///
/// Link 0 must point at the genesis hash; link `i` must point at link `i - 1`.
pub fn verify_links(links: &[ChainLink]) -> Result<(), TrustError> {
    let mut expected_prev = genesis_hash();
    for (index, link) in links.iter().enumerate() {
        if link.data.prev_hash != expected_prev {
            return Err(TrustError::BrokenLink { index });
        }
        if link.data.compute_hash()? != link.hash {
            return Err(TrustError::HashMismatch { index });
        }
        expected_prev = link.hash;
    }
    Ok(())
}

/// Append-only chain plus the metrics snapshot of the latest build.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrustChain {
    links: Vec<ChainLink>,
    metrics: TrustMetrics,
    built_at: Option<Timestamp>,
}

impl TrustChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn metrics(&self) -> &TrustMetrics {
        &self.metrics
    }

    /// When the latest build ran, or `None` before the first build.
    pub fn built_at(&self) -> Option<Timestamp> {
        self.built_at
    }

    /// Hash the next link must reference.
    pub fn head(&self) -> Hash256 {
        self.links.last().map(|l| l.hash).unwrap_or_else(genesis_hash)
    }

    /// Weighted score of the current metrics. Recomputed on every call.
    pub fn trust_score(&self) -> f64 {
        trust_score(&self.metrics)
    }

    /// Audit the whole chain.
    pub fn verify_links(&self) -> Result<(), TrustError> {
        verify_links(&self.links)
    }

    /// Commit a build: swap in the new metrics and extend with pre-sealed links.
    pub(crate) fn commit(
        &mut self,
        metrics: TrustMetrics,
        links: Vec<ChainLink>,
        built_at: Timestamp,
    ) {
        self.metrics = metrics;
        self.links.extend(links);
        self.built_at = Some(built_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(prev: Hash256, text: &str) -> ChainLink {
        ChainLink::seal(LinkData {
            claim: Claim::statement(text),
            sources: vec![],
            metrics: TrustMetrics::ZERO,
            prev_hash: prev,
        })
        .unwrap()
    }

    #[test]
    fn empty_chain_head_is_genesis() {
        let chain = TrustChain::new();
        assert_eq!(chain.head(), genesis_hash());
        assert!(chain.verify_links().is_ok());
    }

    #[test]
    fn detects_broken_back_reference() {
        let a = link(genesis_hash(), "a");
        let b = link(Hash256::ZERO, "b");
        assert_eq!(
            verify_links(&[a, b]),
            Err(TrustError::BrokenLink { index: 1 })
        );
    }

    #[test]
    fn detects_rewritten_content() {
        let a = link(genesis_hash(), "a");
        let mut b = link(a.hash, "b");
        b.data.claim.text = "rewritten".into();
        assert_eq!(
            verify_links(&[a, b]),
            Err(TrustError::HashMismatch { index: 1 })
        );
    }

    #[test]
    fn link_serializes_with_data_and_hash() {
        let a = link(genesis_hash(), "a");
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["data"]["prev_hash"], genesis_hash().to_hex());
        assert_eq!(json["hash"], a.hash.to_hex());
        assert_eq!(json["data"]["claim"]["type"], "statement");
    }
}
