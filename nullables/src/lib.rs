//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of the pipeline (clock, model provider, evidence
//! storage) sits behind a trait. This crate provides implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod provider;
pub mod store;

pub use clock::NullClock;
pub use provider::NullProvider;
pub use store::NullBackend;
