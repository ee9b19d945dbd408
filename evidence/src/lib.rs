//! Evidence vault.
//!
//! A finished verification is frozen into an [`EvidenceRecord`] whose `id` is
//! the SHA-256 of the canonical serialization of everything else in the
//! record. The record is stored under that id, so any later change to the
//! stored bytes is caught by [`EvidenceVault::verify_integrity`].

pub mod error;
pub mod record;
pub mod vault;

pub use error::EvidenceError;
pub use record::{EvidenceRecord, RecordContent};
pub use vault::EvidenceVault;
