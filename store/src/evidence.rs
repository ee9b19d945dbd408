//! Evidence persistence trait.

use async_trait::async_trait;

use crate::StoreError;

/// Exact-match key-value persistence for evidence records.
///
/// Keys are fingerprint hex strings; values are encoded records.
/// Implementations must make `put` a single atomic write and must never
/// reorder or drop writes. A `get` issued after a `put` for the same key
/// returns the written value.
#[async_trait]
pub trait EvidenceBackend: Send + Sync {
    /// Write `value` under `key`.
    ///
    /// Writing identical bytes to an existing key is a no-op. Writing different
    /// bytes to an existing key fails with [`StoreError::Duplicate`].
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Read the value under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Whether `key` exists.
    async fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Release the backend. Later calls fail with [`StoreError::Closed`].
    async fn close(&self) -> Result<(), StoreError>;

    /// Endpoint this backend was opened with.
    fn endpoint(&self) -> &str;
}
