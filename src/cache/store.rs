//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with insertion-order eviction
//! and TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, InsertionOrder};
use crate::error::{CacheError, CacheResult};

// == Cache Store ==
/// Fingerprint-keyed storage for computed results.
#[derive(Debug)]
pub struct CacheStore {
    /// Fingerprint to entry
    entries: HashMap<String, CacheEntry>,
    /// Oldest insertion at the front
    order: InsertionOrder,
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `max_entries` results.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            max_entries,
        }
    }

    // == Put ==
    /// Stores a result under `fingerprint` for `ttl`.
    ///
    /// Storing an existing fingerprint replaces the value, restarts its TTL and
    /// counts as a fresh insertion. At capacity, expired entries are purged
    /// first and then the least recently inserted entry is evicted.
    pub fn put(&mut self, fingerprint: String, value: String, ttl: Duration) {
        if self.max_entries == 0 {
            return;
        }

        let is_overwrite = self.entries.contains_key(&fingerprint);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            self.cleanup_expired();
        }

        while !is_overwrite && self.entries.len() >= self.max_entries {
            match self.order.evict_oldest() {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                    self.stats.record_eviction();
                }
                None => break,
            }
        }

        self.entries
            .insert(fingerprint.clone(), CacheEntry::new(value, ttl));
        self.order.record(&fingerprint);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a live value by fingerprint.
    ///
    /// Expired entries are removed on the spot and reported as `Expired`.
    pub fn get(&mut self, fingerprint: &str) -> CacheResult<String> {
        let expired = match self.entries.get(fingerprint) {
            Some(entry) if !entry.is_expired() => {
                let value = entry.value.clone();
                self.stats.record_hit();
                return Ok(value);
            }
            Some(_) => true,
            None => false,
        };

        self.stats.record_miss();

        if expired {
            self.remove(fingerprint);
            self.stats.record_expirations(1);
            return Err(CacheError::Expired(fingerprint.to_string()));
        }

        Err(CacheError::NotFound(fingerprint.to_string()))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.remove(&key);
        }

        self.stats.record_expirations(count);
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    fn remove(&mut self, fingerprint: &str) {
        self.entries.remove(fingerprint);
        self.order.remove(fingerprint);
        self.stats.set_total_entries(self.entries.len());
    }
}
