//! Span constructors shared by the pipeline.
//!
//! Consistent span names and fields keep traces of one request easy to
//! filter and correlate.

use tracing::{info_span, Span};

/// Covers one `verify` call, from extraction to the stored record.
pub fn verify_span(request: &str) -> Span {
    info_span!("verify", request = %request)
}

/// Covers one pipeline stage inside a [`verify_span`].
pub fn stage_span(stage: &str) -> Span {
    info_span!("stage", stage = %stage)
}
