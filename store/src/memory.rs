//! In-memory evidence backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::{EvidenceBackend, StoreError};

/// Thread-safe in-memory store. Contents are lost when dropped.
pub struct MemoryBackend {
    endpoint: String,
    entries: RwLock<HashMap<String, Vec<u8>>>,
    closed: AtomicBool,
}

impl MemoryBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            entries: RwLock::new(HashMap::new()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(crate::DEFAULT_ENDPOINT)
    }
}

#[async_trait]
impl EvidenceBackend for MemoryBackend {
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.ensure_open()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))?;
        match entries.get(key) {
            Some(existing) if existing.as_slice() == value => Ok(()),
            Some(_) => Err(StoreError::Duplicate(key.to_string())),
            None => {
                entries.insert(key.to_string(), value.to_vec());
                Ok(())
            }
        }
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.ensure_open()?;
        let entries = self
            .entries
            .read()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.closed.store(true, Ordering::Release);
        tracing::debug!(endpoint = %self.endpoint, "memory backend closed");
        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_reads_own_write() {
        let store = MemoryBackend::default();
        store.put("k", b"v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some(&b"v"[..]));
        assert!(store.contains("k").await.unwrap());
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let store = MemoryBackend::default();
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn identical_rewrite_is_idempotent() {
        let store = MemoryBackend::default();
        store.put("k", b"v").await.unwrap();
        store.put("k", b"v").await.unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn conflicting_rewrite_is_refused() {
        let store = MemoryBackend::default();
        store.put("k", b"v").await.unwrap();
        assert_eq!(
            store.put("k", b"other").await,
            Err(StoreError::Duplicate("k".into()))
        );
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some(&b"v"[..]));
    }

    #[tokio::test]
    async fn closed_store_refuses_everything() {
        let store = MemoryBackend::default();
        store.close().await.unwrap();
        assert_eq!(store.put("k", b"v").await, Err(StoreError::Closed));
        assert_eq!(store.get("k").await, Err(StoreError::Closed));
    }
}
