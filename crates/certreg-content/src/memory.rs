//! In-process content store.
//!
//! Content identifiers are derived from the bytes, so storing identical bytes
//! twice yields the same identifier, like a real content-addressed store.
//! The store counts every `store` call so tests can assert that a request
//! never reached it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use certreg_core::ContentHash;
use parking_lot::RwLock;

use crate::error::ContentStoreError;
use crate::types::ContentId;
use crate::ContentStore;

/// Thread-safe, cloneable in-memory content store.
///
/// Clones share the same underlying map and counters.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    blobs: Arc<RwLock<HashMap<ContentId, Vec<u8>>>>,
    store_calls: Arc<AtomicUsize>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `store` calls received, including failed ones.
    pub fn store_calls(&self) -> usize {
        self.store_calls.load(Ordering::SeqCst)
    }

    /// Number of distinct blobs held.
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    /// Whether the store holds no blobs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch a stored blob.
    pub fn get(&self, id: &ContentId) -> Option<Vec<u8>> {
        self.blobs.read().get(id).cloned()
    }

    /// Simulate an outage: while set, `store` and `health_check` fail.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), ContentStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ContentStoreError::Unavailable("memory store marked unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn store(&self, bytes: Vec<u8>) -> Result<ContentId, ContentStoreError> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let hash = ContentHash::of(&bytes);
        let id = ContentId::new(format!("mem-{}", &hash.as_str()[..32]));
        self.blobs.write().insert(id.clone(), bytes);
        Ok(id)
    }

    async fn health_check(&self) -> Result<(), ContentStoreError> {
        self.check_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn identical_bytes_share_an_id() {
        let store = MemoryContentStore::new();
        let a = store.store(b"diploma".to_vec()).await.unwrap();
        let b = store.store(b"diploma".to_vec()).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
        assert_eq!(store.store_calls(), 2);
    }

    #[tokio::test]
    async fn id_differs_from_content_hash() {
        let store = MemoryContentStore::new();
        let id = store.store(b"x".to_vec()).await.unwrap();
        assert_ne!(id.as_str(), ContentHash::of(b"x").as_str());
        assert_eq!(store.get(&id).as_deref(), Some(&b"x"[..]));
    }

    #[tokio::test]
    async fn unavailable_store_rejects_and_still_counts() {
        let store = MemoryContentStore::new();
        store.set_unavailable(true);
        assert!(matches!(
            store.store(b"x".to_vec()).await,
            Err(ContentStoreError::Unavailable(_))
        ));
        assert!(store.health_check().await.is_err());
        assert_eq!(store.store_calls(), 1);
        assert!(store.is_empty());

        store.set_unavailable(false);
        assert!(store.health_check().await.is_ok());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MemoryContentStore::new();
        let clone = store.clone();
        clone.store(b"shared".to_vec()).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.store_calls(), 1);
    }
}
