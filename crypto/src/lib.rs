//! Cryptographic primitives for Doppelcheck.
//!
//! - **SHA-256** for chain link hashes, evidence fingerprints and request fingerprints
//! - **Canonical JSON** so identical logical content always hashes to identical bytes

pub mod canonical;
pub mod hash;

pub use canonical::{to_canonical_bytes, write_canonical, CanonicalError};
pub use hash::{genesis_hash, hash_canonical, sha256, GENESIS_SEED};
