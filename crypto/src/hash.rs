//! SHA-256 hashing for chain links and evidence records.

use doppelcheck_types::Hash256;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical::{to_canonical_bytes, CanonicalError};

/// Seed hashed to produce the `prev_hash` of the first link in every chain.
pub const GENESIS_SEED: &[u8] = b"genesis";

/// Compute a 256-bit SHA-256 hash of arbitrary data.
pub fn sha256(data: &[u8]) -> Hash256 {
    let result = Sha256::digest(data);
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    Hash256::new(output)
}

/// `SHA-256("genesis")`, the well-known predecessor of link 0.
pub fn genesis_hash() -> Hash256 {
    sha256(GENESIS_SEED)
}

/// Hash the canonical serialization of `value`.
pub fn hash_canonical<T: Serialize + ?Sized>(value: &T) -> Result<Hash256, CanonicalError> {
    Ok(sha256(&to_canonical_bytes(value)?))
}
