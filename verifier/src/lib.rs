//! Verification orchestrator.
//!
//! [`Verifier::verify`] runs one claim through the pipeline:
//!
//! ```text
//! Queued -> Extracting -> Normalizing -> LedgerBuild -> ModelVerify -> EvidenceStore -> Done
//! ```
//!
//! with `Failed` reachable from any phase. Stages run strictly in order inside
//! one request; separate requests run concurrently. Identical requests that
//! overlap in time share one execution (single-flight), so the model is asked
//! once and one evidence record is written.

pub mod backend;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod single_flight;
pub mod state;

pub use backend::open_backend;
pub use config::{DuplicatePolicy, VerifierConfig};
pub use error::{PipelineError, StageError, VerifierError};
pub use orchestrator::{request_fingerprint, Verifier, VerifierBuilder};
pub use report::VerificationReport;
pub use single_flight::{Admission, LeaderGuard, SingleFlight};
pub use state::{InvalidTransition, PipelineRun, VerificationPhase};
