//! Shared utilities for Doppelcheck.

pub mod logging;
pub mod spans;

pub use logging::{init_logging, LogFormat, LogFormatError};
pub use spans::{stage_span, verify_span};
