//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A cached result together with its insertion time and lifetime.
///
/// Expiry is decided by a monotonic deadline, so wall-clock adjustments
/// cannot extend an entry's life. `inserted_at` is informational only.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Decimal rendering of the computed value
    pub value: String,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
    /// Time-to-live granted at insertion
    pub ttl: Duration,
    /// Monotonic expiry; `None` when the TTL is too large to represent
    deadline: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry that expires `ttl` after now.
    pub fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            inserted_at: current_timestamp_ms(),
            ttl,
            deadline: Instant::now().checked_add(ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the deadline is reached, so a zero TTL is
    /// never readable.
    pub fn is_expired(&self) -> bool {
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as 0.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("120".to_string(), Duration::from_secs(60));

        assert_eq!(entry.value, "120");
        assert_eq!(entry.ttl, Duration::from_secs(60));
        assert!(entry.inserted_at > 0);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("16".to_string(), Duration::from_millis(50));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(80));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_expiry_ignores_wall_clock_timestamp() {
        let mut fresh = CacheEntry::new("21".to_string(), Duration::from_secs(60));
        fresh.inserted_at = 0;
        assert!(!fresh.is_expired());

        let mut stale = CacheEntry::new("21".to_string(), Duration::from_millis(20));
        stale.inserted_at = u64::MAX;
        sleep(Duration::from_millis(40));
        assert!(stale.is_expired());
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let entry = CacheEntry::new("1".to_string(), Duration::ZERO);
        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }

    #[test]
    fn test_huge_ttl_never_expires() {
        let entry = CacheEntry::new("1".to_string(), Duration::MAX);
        assert!(!entry.is_expired());
    }
}
