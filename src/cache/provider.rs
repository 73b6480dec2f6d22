//! Result Cache Port
//!
//! The async get/put contract the computation service depends on, and the
//! in-process adapter backed by `CacheStore`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};
use crate::error::{CacheError, CacheResult};

// == Result Cache ==
/// Key-value store for computed results, keyed by request fingerprint.
///
/// `Ok(None)` means a miss. `Err` means the store itself misbehaved; callers
/// treat that as a miss too.
#[async_trait]
pub trait ResultCache: Send + Sync {
    async fn get(&self, fingerprint: &str) -> CacheResult<Option<String>>;

    async fn put(&self, fingerprint: &str, value: String, ttl: Duration) -> CacheResult<()>;

    /// Counters for the stats endpoint, when the backend keeps any.
    async fn stats(&self) -> Option<CacheStats> {
        None
    }
}

// == Memory Result Cache ==
/// `ResultCache` over a shared, lock-protected `CacheStore`.
#[derive(Debug, Clone)]
pub struct MemoryResultCache {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryResultCache {
    pub fn new(max_entries: usize) -> Self {
        Self::from_store(Arc::new(RwLock::new(CacheStore::new(max_entries))))
    }

    pub fn from_store(store: Arc<RwLock<CacheStore>>) -> Self {
        Self { store }
    }

    /// Shared handle to the underlying store, e.g. for the cleanup task.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        Arc::clone(&self.store)
    }
}

#[async_trait]
impl ResultCache for MemoryResultCache {
    async fn get(&self, fingerprint: &str) -> CacheResult<Option<String>> {
        // Write lock: reads update stats and may drop an expired entry
        let mut store = self.store.write().await;
        match store.get(fingerprint) {
            Ok(value) => Ok(Some(value)),
            Err(CacheError::NotFound(_)) | Err(CacheError::Expired(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn put(&self, fingerprint: &str, value: String, ttl: Duration) -> CacheResult<()> {
        let mut store = self.store.write().await;
        store.put(fingerprint.to_string(), value, ttl);
        Ok(())
    }

    async fn stats(&self) -> Option<CacheStats> {
        Some(self.store.read().await.stats())
    }
}
