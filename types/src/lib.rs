//! Fundamental types for Doppelcheck.
//!
//! This crate defines the data model shared across every other crate in the workspace:
//! claims, raw and normalized sources, trust metrics, digests, timestamps, and the
//! error classification used by every component error.

pub mod claim;
pub mod error;
pub mod hash;
pub mod metrics;
pub mod source;
pub mod time;

pub use claim::{Claim, ClaimKind};
pub use error::{ErrorClass, TypesError};
pub use hash::{Fingerprint, Hash256};
pub use metrics::TrustMetrics;
pub use source::{NormalizedSource, RawSource};
pub use time::{Clock, SystemClock, Timestamp};
