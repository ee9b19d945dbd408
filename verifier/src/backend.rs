use std::sync::Arc;

use doppelcheck_store::{Endpoint, EvidenceBackend, MemoryBackend};
use doppelcheck_store_lmdb::{LmdbEvidenceBackend, DEFAULT_MAP_SIZE};

use crate::VerifierError;

/// Open the backend an endpoint names.
///
/// `memory://` backends are fresh and empty on every call. `lmdb://`
/// directories are created if missing.
pub fn open_backend(url: &str) -> Result<Arc<dyn EvidenceBackend>, VerifierError> {
    let backend: Arc<dyn EvidenceBackend> = match Endpoint::parse(url)? {
        Endpoint::Memory { .. } => Arc::new(MemoryBackend::new(url)),
        Endpoint::Lmdb { path } => Arc::new(LmdbEvidenceBackend::open(&path, DEFAULT_MAP_SIZE)?),
    };
    tracing::info!(endpoint = %backend.endpoint(), "evidence backend open");
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use doppelcheck_store::StoreError;

    #[tokio::test]
    async fn opens_memory_and_lmdb() {
        let mem = open_backend("memory://localhost/evidence").unwrap();
        assert_eq!(mem.endpoint(), "memory://localhost/evidence");

        let dir = tempfile::tempdir().unwrap();
        let url = format!("lmdb://{}", dir.path().join("vault").display());
        let lmdb = open_backend(&url).unwrap();
        lmdb.put("k", b"v").await.unwrap();
        assert_eq!(lmdb.get("k").await.unwrap(), Some(b"v".to_vec()));
        lmdb.close().await.unwrap();
    }

    #[test]
    fn unknown_scheme_is_configuration_error() {
        assert!(matches!(
            open_backend("redis://localhost"),
            Err(VerifierError::Store(StoreError::InvalidEndpoint(_)))
        ));
    }
}
