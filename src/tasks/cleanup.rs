//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.
//! Reads already ignore expired entries; the sweep only reclaims memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically cleans up expired cache entries.
///
/// # Arguments
/// * `cache` - shared store, typically `MemoryResultCache::store()`
/// * `cleanup_interval_secs` - seconds between sweeps (0 is treated as 1)
///
/// # Returns
/// A JoinHandle for the spawned task, to be aborted during graceful shutdown.
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<CacheStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut store = cache.write().await;
                let removed = store.cleanup_expired();
                (removed, store.len())
            };

            if removed > 0 {
                info!(removed, remaining, "TTL cleanup removed expired results");
            } else {
                debug!(remaining, "TTL cleanup found no expired results");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = Arc::new(RwLock::new(CacheStore::new(100)));

        cache.write().await.put(
            "factorial:5".to_string(),
            "120".to_string(),
            Duration::from_millis(200),
        );

        let handle = spawn_cleanup_task(cache.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        // Checked through len() so the sweep, not a read, did the removal
        assert_eq!(cache.read().await.len(), 0);
        assert_eq!(cache.read().await.stats().expirations, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let cache = Arc::new(RwLock::new(CacheStore::new(100)));

        cache.write().await.put(
            "power:4:2".to_string(),
            "16".to_string(),
            Duration::from_secs(3600),
        );

        let handle = spawn_cleanup_task(cache.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        let value = cache.write().await.get("power:4:2");
        assert_eq!(value.unwrap(), "16");

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = Arc::new(RwLock::new(CacheStore::new(100)));

        let handle = spawn_cleanup_task(cache, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
