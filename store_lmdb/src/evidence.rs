//! LMDB implementation of EvidenceBackend.

use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;
use heed::types::Bytes;
use heed::{Database, Env};

use doppelcheck_store::{EvidenceBackend, StoreError};

use crate::environment::LmdbEnvironment;
use crate::integrity::check_integrity;
use crate::LmdbError;

pub struct LmdbEvidenceBackend {
    endpoint: String,
    handle: RwLock<Option<(Env, Database<Bytes, Bytes>)>>,
}

impl LmdbEvidenceBackend {
    /// Open (or create) the evidence database under `path`.
    ///
    /// Scans the database once on open; malformed entries are logged, not fatal.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, StoreError> {
        let environment = LmdbEnvironment::open(path, map_size)?;
        check_integrity(&environment)?;
        Ok(Self {
            endpoint: format!("lmdb://{}", path.display()),
            handle: RwLock::new(Some((
                environment.env().clone(),
                environment.evidence_db(),
            ))),
        })
    }

    fn handle(&self) -> Result<(Env, Database<Bytes, Bytes>), StoreError> {
        let guard = self
            .handle
            .read()
            .map_err(|_| StoreError::Backend("LMDB handle lock poisoned".into()))?;
        guard.clone().ok_or(StoreError::Closed)
    }
}

fn put_blocking(
    env: &Env,
    db: Database<Bytes, Bytes>,
    key: &str,
    value: &[u8],
) -> Result<(), StoreError> {
    let mut wtxn = env.write_txn().map_err(LmdbError::from)?;
    let existing = db
        .get(&wtxn, key.as_bytes())
        .map_err(LmdbError::from)?
        .map(|v| v.to_vec());
    match existing {
        Some(bytes) if bytes == value => Ok(()),
        Some(_) => Err(StoreError::Duplicate(key.to_string())),
        None => {
            db.put(&mut wtxn, key.as_bytes(), value)
                .map_err(LmdbError::from)?;
            wtxn.commit().map_err(LmdbError::from)?;
            Ok(())
        }
    }
}

fn get_blocking(
    env: &Env,
    db: Database<Bytes, Bytes>,
    key: &str,
) -> Result<Option<Vec<u8>>, StoreError> {
    let rtxn = env.read_txn().map_err(LmdbError::from)?;
    let value = db
        .get(&rtxn, key.as_bytes())
        .map_err(LmdbError::from)?
        .map(|v| v.to_vec());
    Ok(value)
}

#[async_trait]
impl EvidenceBackend for LmdbEvidenceBackend {
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let (env, db) = self.handle()?;
        let key = key.to_string();
        let value = value.to_vec();
        tokio::task::spawn_blocking(move || put_blocking(&env, db, &key, &value))
            .await
            .map_err(LmdbError::from)?
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let (env, db) = self.handle()?;
        let key = key.to_string();
        tokio::task::spawn_blocking(move || get_blocking(&env, db, &key))
            .await
            .map_err(LmdbError::from)?
    }

    async fn close(&self) -> Result<(), StoreError> {
        let taken = self
            .handle
            .write()
            .map_err(|_| StoreError::Backend("LMDB handle lock poisoned".into()))?
            .take();
        if let Some((env, _)) = taken {
            env.force_sync().map_err(LmdbError::from)?;
            tracing::info!(endpoint = %self.endpoint, "LMDB evidence backend closed");
        }
        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_MAP_SIZE;

    #[tokio::test]
    async fn put_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LmdbEvidenceBackend::open(dir.path(), DEFAULT_MAP_SIZE).unwrap();
        backend.put("abc", b"record").await.unwrap();
        assert_eq!(backend.get("abc").await.unwrap().as_deref(), Some(&b"record"[..]));
        assert_eq!(backend.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn conflicting_write_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LmdbEvidenceBackend::open(dir.path(), DEFAULT_MAP_SIZE).unwrap();
        backend.put("abc", b"one").await.unwrap();
        backend.put("abc", b"one").await.unwrap();
        assert_eq!(
            backend.put("abc", b"two").await,
            Err(StoreError::Duplicate("abc".into()))
        );
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let backend = LmdbEvidenceBackend::open(dir.path(), DEFAULT_MAP_SIZE).unwrap();
            backend.put("abc", b"durable").await.unwrap();
            backend.close().await.unwrap();
        }
        let backend = LmdbEvidenceBackend::open(dir.path(), DEFAULT_MAP_SIZE).unwrap();
        assert_eq!(backend.get("abc").await.unwrap().as_deref(), Some(&b"durable"[..]));
    }

    #[tokio::test]
    async fn closed_backend_refuses_calls() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LmdbEvidenceBackend::open(dir.path(), DEFAULT_MAP_SIZE).unwrap();
        backend.close().await.unwrap();
        assert_eq!(backend.get("abc").await, Err(StoreError::Closed));
    }
}
