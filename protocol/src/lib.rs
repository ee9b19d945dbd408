//! Verification protocol inputs.
//!
//! Two steps run before any trust computation:
//! 1. **Claim extraction** turns input text into one or more [`Claim`]s. The
//!    segmentation algorithm is external; this crate defines the interface and
//!    a whole-text default.
//! 2. **Source normalization** filters raw source records down to the ones that
//!    carry `url`, `content` and `type`, and strips everything else.
//!
//! [`Claim`]: doppelcheck_types::Claim

pub mod error;
pub mod extract;
pub mod sources;

pub use error::ProtocolError;
pub use extract::{ClaimExtractor, WholeTextExtractor};
pub use sources::{is_valid_source, normalize_source, validate_and_normalize, REQUIRED_FIELDS};
