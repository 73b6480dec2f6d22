//! Cache Module
//!
//! Result cache with TTL expiration and least-recently-inserted eviction,
//! plus the `ResultCache` port the computation service talks to.

mod entry;
mod insertion;
mod provider;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use insertion::InsertionOrder;
pub use provider::{MemoryResultCache, ResultCache};
pub use stats::CacheStats;
pub use store::CacheStore;
