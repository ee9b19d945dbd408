//! Nullable store: thread-safe in-memory evidence storage for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use doppelcheck_store::{EvidenceBackend, StoreError};

/// An in-memory evidence backend with knobs for tests.
///
/// Counts successful writes, can be switched offline, and lets a test
/// overwrite stored bytes behind the vault's back.
pub struct NullBackend {
    records: Mutex<HashMap<String, Vec<u8>>>,
    writes: AtomicUsize,
    offline: AtomicBool,
    closed: AtomicBool,
}

impl NullBackend {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            writes: AtomicUsize::new(0),
            offline: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    /// Successful `put` calls that stored new bytes.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys(&self) -> Vec<String> {
        self.records.lock().unwrap().keys().cloned().collect()
    }

    /// Make every later call fail with `Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Replace stored bytes without any checks.
    pub fn put_raw(&self, key: &str, value: Vec<u8>) {
        self.records.lock().unwrap().insert(key.to_string(), value);
    }

    /// Raw stored bytes.
    pub fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        self.records.lock().unwrap().get(key).cloned()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Closed);
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("null backend offline".into()));
        }
        Ok(())
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EvidenceBackend for NullBackend {
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        match records.get(key) {
            Some(existing) if existing.as_slice() == value => Ok(()),
            Some(_) => Err(StoreError::Duplicate(key.to_string())),
            None => {
                records.insert(key.to_string(), value.to_vec());
                self.writes.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.check()?;
        Ok(self.records.lock().unwrap().get(key).cloned())
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn endpoint(&self) -> &str {
        "memory://null"
    }
}
