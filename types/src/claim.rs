//! Claims extracted from input text.

use serde::{Deserialize, Serialize};

/// Kind of an extracted claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    Statement,
    Quantitative,
    Attribution,
}

/// A single verifiable claim. Immutable once extracted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ClaimKind,
}

impl Claim {
    pub fn statement(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ClaimKind::Statement,
        }
    }
}
