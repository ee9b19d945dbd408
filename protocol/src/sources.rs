//! Source validation and normalization.
//!
//! Filtering, not all-or-nothing validation: malformed sources are dropped and
//! the survivors keep their relative order.

use doppelcheck_types::{NormalizedSource, RawSource};

/// Fields every source must carry, each as a JSON string.
pub const REQUIRED_FIELDS: [&str; 3] = ["url", "content", "type"];

/// Whether a raw source has every required field as a string.
pub fn is_valid_source(source: &RawSource) -> bool {
    REQUIRED_FIELDS
        .iter()
        .all(|field| source.get_str(field).is_some())
}

/// Normalize a single source, or `None` if it is malformed.
pub fn normalize_source(source: &RawSource) -> Option<NormalizedSource> {
    Some(NormalizedSource {
        url: source.get_str("url")?.to_string(),
        content: source.get_str("content")?.to_string(),
        source_type: source.get_str("type")?.to_string(),
        validated: true,
    })
}

/// Validate and normalize a batch of sources, dropping malformed ones.
pub fn validate_and_normalize(sources: &[RawSource]) -> Vec<NormalizedSource> {
    sources
        .iter()
        .enumerate()
        .filter_map(|(index, source)| {
            let normalized = normalize_source(source);
            if normalized.is_none() {
                let missing: Vec<&str> = REQUIRED_FIELDS
                    .iter()
                    .copied()
                    .filter(|f| source.get_str(f).is_none())
                    .collect();
                tracing::debug!(index, ?missing, "dropping malformed source");
            }
            normalized
        })
        .collect()
}
