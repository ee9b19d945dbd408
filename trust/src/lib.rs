//! Trust ledger.
//!
//! Each verification session owns one [`TrustLedger`]. A build recomputes the
//! four trust metrics through pluggable scorers, then appends one hash-sealed
//! [`ChainLink`] per claim. Every link commits to the previous link's hash (or
//! to `SHA-256("genesis")` for the first link), so rewriting any stored link
//! breaks every hash after it.
//!
//! The trust score is a pure function of the current metrics, never of chain
//! length.

pub mod chain;
pub mod error;
pub mod ledger;
pub mod score;
pub mod scoring;

pub use chain::{verify_links, ChainLink, LinkData, TrustChain};
pub use error::TrustError;
pub use ledger::TrustLedger;
pub use score::{trust_score, WEIGHTS};
pub use scoring::{
    scorer_fn, ConstantScorer, FnScorer, MetricScorer, Scorers, ScoringError, ScoringInput,
};
