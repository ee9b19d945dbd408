//! Storage endpoint parsing.

use std::path::PathBuf;

use crate::StoreError;

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "memory://localhost/evidence";

/// A parsed storage endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Process-local, non-durable store. `memory://<name>`
    Memory { name: String },
    /// LMDB environment directory. `lmdb://<path>`
    Lmdb { path: PathBuf },
}

impl Endpoint {
    pub fn parse(url: &str) -> Result<Self, StoreError> {
        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| StoreError::InvalidEndpoint(format!("missing scheme: {url}")))?;
        if rest.is_empty() {
            return Err(StoreError::InvalidEndpoint(format!("empty location: {url}")));
        }
        match scheme {
            "memory" => Ok(Endpoint::Memory {
                name: rest.to_string(),
            }),
            "lmdb" => Ok(Endpoint::Lmdb {
                path: PathBuf::from(rest),
            }),
            other => Err(StoreError::InvalidEndpoint(format!(
                "unsupported scheme '{other}' in {url}"
            ))),
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint::Memory {
            name: "localhost/evidence".to_string(),
        }
    }
}
