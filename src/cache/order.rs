//! Insertion Order Module
//!
//! Tracks keys by insertion/refresh time for oldest-first eviction.

use std::collections::VecDeque;

// == Insertion Order ==
/// Tracks keys in the order their entries were created or refreshed.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently written
/// - Back = Oldest `created_at`
///
/// Reads never reorder keys; only writes do. Eviction therefore follows
/// creation time rather than access recency, and ties are resolved by
/// write order.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    order: VecDeque<String>,
}

impl InsertionOrder {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record Write ==
    /// Marks a key as freshly written (moves to front).
    pub fn record_write(&mut self, key: &str) {
        self.remove(key);
        self.order.push_front(key.to_string());
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Pop Oldest ==
    /// Returns and removes the key with the oldest write time.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
