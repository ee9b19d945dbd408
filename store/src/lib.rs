//! Abstract evidence persistence.
//!
//! Every backend (in-memory, LMDB) implements [`EvidenceBackend`]: an exact-match
//! key-value store keyed by fingerprint hex. The rest of the workspace depends
//! only on the trait.

pub mod endpoint;
pub mod error;
pub mod evidence;
pub mod keyed;
pub mod memory;

pub use endpoint::{Endpoint, DEFAULT_ENDPOINT};
pub use error::StoreError;
pub use evidence::EvidenceBackend;
pub use keyed::{KeyGuard, KeyedLocks};
pub use memory::MemoryBackend;
