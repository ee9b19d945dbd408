//! LMDB storage backend for Doppelcheck.
//!
//! Implements [`EvidenceBackend`] from `doppelcheck-store` using the `heed`
//! LMDB bindings. Every `put` is one LMDB write transaction, so a record is
//! either fully committed or absent. LMDB calls are blocking and run on
//! tokio's blocking pool.
//!
//! [`EvidenceBackend`]: doppelcheck_store::EvidenceBackend

pub mod environment;
pub mod error;
pub mod evidence;
pub mod integrity;

pub use environment::{LmdbEnvironment, DEFAULT_MAP_SIZE};
pub use error::LmdbError;
pub use evidence::LmdbEvidenceBackend;
pub use integrity::{check_integrity, IntegrityReport};
