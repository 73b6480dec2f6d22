//! Insertion Order Module
//!
//! Tracks the order in which fingerprints were stored so the oldest insertion
//! can be evicted first. Reads do not reorder anything.

use std::collections::VecDeque;

// == Insertion Order ==
/// FIFO of cached fingerprints.
///
/// - Front = oldest insertion
/// - Back = newest insertion
#[derive(Debug, Default)]
pub struct InsertionOrder {
    order: VecDeque<String>,
}

impl InsertionOrder {
    pub fn new() -> Self {
        Self::default()
    }

    // == Record ==
    /// Marks a key as just inserted. Re-inserting a key moves it to the back.
    pub fn record(&mut self, key: &str) {
        self.remove(key);
        self.order.push_back(key.to_string());
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently inserted key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_in_insertion_order() {
        let mut order = InsertionOrder::new();
        order.record("power:2:2");
        order.record("factorial:5");
        order.record("fibonacci:8");

        assert_eq!(order.evict_oldest(), Some("power:2:2".to_string()));
        assert_eq!(order.evict_oldest(), Some("factorial:5".to_string()));
        assert_eq!(order.len(), 1);
    }

    #[test]
    fn test_reinsert_moves_to_back() {
        let mut order = InsertionOrder::new();
        order.record("a");
        order.record("b");
        order.record("a");

        assert_eq!(order.len(), 2);
        assert_eq!(order.evict_oldest(), Some("b".to_string()));
    }

    #[test]
    fn test_remove_and_empty() {
        let mut order = InsertionOrder::new();
        assert!(order.evict_oldest().is_none());

        order.record("a");
        order.remove("a");
        assert!(order.is_empty());
    }
}
