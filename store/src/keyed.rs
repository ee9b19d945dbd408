//! Per-key write serialization.
//!
//! Writes for the same key are serialized. Writes for different keys run in
//! parallel, up to a global concurrency limit.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, OwnedSemaphorePermit, Semaphore};

/// Held while writing one key. Dropping it releases the key.
pub struct KeyGuard {
    _key: OwnedMutexGuard<()>,
    _permit: OwnedSemaphorePermit,
}

pub struct KeyedLocks {
    /// Per-key mutexes
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    /// Maximum concurrent holders
    max_concurrent: usize,
    /// Semaphore for limiting total concurrency
    semaphore: Arc<Semaphore>,
}

impl KeyedLocks {
    pub fn new(max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            locks: Mutex::new(HashMap::new()),
            max_concurrent,
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    async fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Wait until `key` is free, then hold it until the guard is dropped.
    pub async fn acquire(&self, key: &str) -> KeyGuard {
        // The semaphore is never closed, so acquisition only fails on close.
        let permit = match Arc::clone(&self.semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => unreachable!("keyed lock semaphore is never closed"),
        };
        let lock = self.key_lock(key).await;
        let guard = lock.lock_owned().await;
        KeyGuard {
            _key: guard,
            _permit: permit,
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Number of keys with a lock entry.
    pub async fn tracked_keys(&self) -> usize {
        self.locks.lock().await.len()
    }

    /// Drop lock entries nobody holds.
    pub async fn cleanup(&self) {
        let mut locks = self.locks.lock().await;
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}

impl Default for KeyedLocks {
    fn default() -> Self {
        Self::new(64)
    }
}
