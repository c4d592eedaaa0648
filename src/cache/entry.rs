//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A single cached value together with its expiry metadata.
///
/// `created_at` uses tokio's monotonic clock so that tests running on a
/// paused runtime can advance time deterministically.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Time of insertion or last refresh
    pub created_at: Instant,
    /// Time-to-live measured from `created_at`
    pub ttl: Duration,
    /// Number of successful reads since insertion or last refresh
    pub hit_count: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a fresh entry stamped with the current time and zero hits.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            ttl,
            hit_count: 0,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has outlived its TTL.
    ///
    /// An entry is live while `now - created_at <= ttl`. The boundary instant
    /// itself still counts as live; only strictly later reads see it expired.
    pub fn is_expired(&self) -> bool {
        self.age() > self.ttl
    }

    // == Age ==
    /// Time elapsed since the entry was inserted or refreshed.
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.created_at)
    }

    // == Time To Live ==
    /// Remaining lifetime, saturating at zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.ttl.saturating_sub(self.age())
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hit_count += 1;
    }
}
