//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with insertion-order eviction
//! and lazy TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::cache::{CacheEntry, CacheStats, InsertionOrder, LookupCounters};

// == Cache Store ==
/// Bounded key-value storage with per-entry TTL.
///
/// Not synchronized; wrap in [`crate::cache::SharedCache`] to share between
/// tasks.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Write-order tracker used to pick eviction victims
    order: InsertionOrder,
    /// Lifetime lookup counters
    counters: LookupCounters,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL applied when `set` is called without one
    default_ttl: Duration,
    /// Wall-clock time of the last counter reset
    last_reset: Option<DateTime<Utc>>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// A capacity of zero is raised to one so the store can always hold the
    /// most recent write.
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            counters: LookupCounters::default(),
            max_entries: max_entries.max(1),
            default_ttl,
            last_reset: None,
        }
    }

    // == Set ==
    /// Stores a value, replacing any existing entry under the same key.
    ///
    /// A replaced entry gets a fresh `created_at` and its hit count restarts
    /// at zero. When a new key would overflow capacity, the entry with the
    /// oldest `created_at` is evicted first.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }

        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key.clone(), entry);
        self.order.record_write(&key);
    }

    // == Get ==
    /// Returns a clone of the value if present and live.
    ///
    /// Expired entries are removed on the spot and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        if self.take_if_expired(key) {
            self.counters.record_miss();
            return None;
        }

        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.record_hit();
                self.counters.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.counters.record_miss();
                None
            }
        }
    }

    // == Has ==
    /// True if the key is present and live. Does not count as a hit.
    pub fn has(&mut self, key: &str) -> bool {
        if self.take_if_expired(key) {
            return false;
        }
        self.entries.contains_key(key)
    }

    // == Delete ==
    /// Removes an entry, returning whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            true
        } else {
            false
        }
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    // == Cleanup ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.order.remove(key);
        }

        self.counters.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    // == Invalidate Prefix ==
    /// Removes every entry whose key starts with `prefix`.
    pub fn invalidate_prefix(&mut self, prefix: &str) -> usize {
        self.retain(|key, _| !key.starts_with(prefix))
    }

    // == Retain ==
    /// Keeps only the entries for which `keep` returns true.
    ///
    /// Returns the number of entries removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str, &V) -> bool,
    {
        let doomed: Vec<String> = self
            .entries
            .iter()
            .filter(|(key, entry)| !keep(key, &entry.value))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &doomed {
            self.entries.remove(key);
            self.order.remove(key);
        }
        doomed.len()
    }

    // == Update ==
    /// Mutates a live entry in place.
    ///
    /// `created_at` and the hit count are left alone, so an in-place update
    /// never extends the entry's lifetime. Returns false when the key is
    /// absent or expired.
    pub fn update<F>(&mut self, key: &str, f: F) -> bool
    where
        F: FnOnce(&mut V),
    {
        if self.take_if_expired(key) {
            return false;
        }
        match self.entries.get_mut(key) {
            Some(entry) => {
                f(&mut entry.value);
                true
            }
            None => false,
        }
    }

    // == Reset ==
    /// Zeroes the lookup counters and stamps the reset time. Entries stay.
    pub fn reset_stats(&mut self) {
        self.counters = LookupCounters::default();
        self.last_reset = Some(Utc::now());
    }

    /// Drops every entry and restarts the counters, as the daily reset does.
    ///
    /// Returns the number of entries dropped.
    pub fn reset(&mut self) -> usize {
        let dropped = self.entries.len();
        self.clear();
        self.reset_stats();
        info!(dropped, "cache reset");
        dropped
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats::from_resident(
            self.entries.values().map(|entry| entry.hit_count),
            self.max_entries,
            self.counters,
        );
        stats.last_reset = self.last_reset;
        stats
    }

    pub fn last_reset(&self) -> Option<DateTime<Utc>> {
        self.last_reset
    }

    /// Hit count of a resident entry, without touching it.
    pub fn hit_count(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.hit_count)
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn take_if_expired(&mut self, key: &str) -> bool {
        let expired = self
            .entries
            .get(key)
            .map(|entry| entry.is_expired())
            .unwrap_or(false);

        if expired {
            self.entries.remove(key);
            self.order.remove(key);
            self.counters.record_expirations(1);
        }
        expired
    }

    fn evict_oldest(&mut self) {
        if let Some(victim) = self.order.pop_oldest() {
            self.entries.remove(&victim);
            self.counters.record_eviction();
            debug!(key = %victim, "evicted oldest cache entry");
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn test_store_new() {
        let store: CacheStore<String> = CacheStore::new(100, TTL);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
        assert_eq!(store.default_ttl(), TTL);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut store = CacheStore::new(0, TTL);
        store.set("a", 1, None);
        store.set("b", 2, None);
        assert_eq!(store.capacity(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("b"), Some(2));
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(100, TTL);

        store.set("key1", "value1".to_string(), None);

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store: CacheStore<String> = CacheStore::new(100, TTL);
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_delete() {
        let mut store = CacheStore::new(100, TTL);

        store.set("key1", "value1", None);
        assert!(store.delete("key1"));
        assert!(!store.delete("key1"));

        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_overwrite_resets_hits() {
        let mut store = CacheStore::new(100, TTL);

        store.set("key1", "value1", None);
        store.get("key1");
        store.get("key1");
        assert_eq!(store.hit_count("key1"), Some(2));

        store.set("key1", "value2", None);

        assert_eq!(store.hit_count("key1"), Some(0));
        assert_eq!(store.get("key1"), Some("value2"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_ttl_expiration() {
        let mut store = CacheStore::new(100, TTL);

        store.set("key1", "value1", Some(Duration::from_secs(1)));
        assert_eq!(store.get("key1"), Some("value1"));

        tokio::time::advance(Duration::from_millis(1100)).await;

        assert_eq!(store.get("key1"), None);
        assert!(!store.has("key1"));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_has_removes_expired_without_hit() {
        let mut store = CacheStore::new(100, TTL);

        store.set("key1", 7, Some(Duration::from_secs(2)));
        assert!(store.has("key1"));
        assert_eq!(store.hit_count("key1"), Some(0));

        tokio::time::advance(Duration::from_secs(3)).await;
        assert!(!store.has("key1"));
        assert_eq!(store.hit_count("key1"), None);
    }

    #[test]
    fn test_store_evicts_oldest_created() {
        let mut store = CacheStore::new(3, TTL);

        store.set("key1", 1, None);
        store.set("key2", 2, None);
        store.set("key3", 3, None);

        // Reads must not protect key1; eviction follows creation time
        store.get("key1");

        store.set("key4", 4, None);

        assert_eq!(store.len(), 3);
        assert!(!store.has("key1"));
        assert!(store.has("key2"));
        assert!(store.has("key3"));
        assert!(store.has("key4"));
        assert_eq!(store.stats().counters.evictions, 1);
    }

    #[test]
    fn test_refresh_protects_from_eviction() {
        let mut store = CacheStore::new(3, TTL);

        store.set("key1", 1, None);
        store.set("key2", 2, None);
        store.set("key3", 3, None);

        // Rewriting key1 refreshes created_at; key2 becomes the oldest
        store.set("key1", 10, None);
        store.set("key4", 4, None);

        assert!(store.has("key1"));
        assert!(!store.has("key2"));
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let mut store = CacheStore::new(2, TTL);

        store.set("a", 1, None);
        store.set("b", 2, None);
        store.set("b", 3, None);

        assert_eq!(store.len(), 2);
        assert!(store.has("a"));
        assert_eq!(store.stats().counters.evictions, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_cleanup() {
        let mut store = CacheStore::new(100, TTL);

        store.set("key1", "value1", Some(Duration::from_secs(1)));
        store.set("key2", "value2", Some(Duration::from_secs(10)));

        tokio::time::advance(Duration::from_millis(1100)).await;

        assert_eq!(store.cleanup(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.has("key2"));
        assert_eq!(store.cleanup(), 0);
    }

    #[test]
    fn test_store_clear() {
        let mut store = CacheStore::new(10, TTL);
        store.set("a", 1, None);
        store.set("b", 2, None);

        store.clear();

        assert!(store.is_empty());
        store.set("c", 3, None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_invalidate_prefix() {
        let mut store = CacheStore::new(10, TTL);
        store.set("product:1", 1, None);
        store.set("product:2", 2, None);
        store.set("user:1", 3, None);

        assert_eq!(store.invalidate_prefix("product:"), 2);

        assert!(!store.has("product:1"));
        assert!(!store.has("product:2"));
        assert_eq!(store.get("user:1"), Some(3));
    }

    #[test]
    fn test_invalidate_prefix_on_empty_store() {
        let mut store: CacheStore<u8> = CacheStore::new(10, TTL);
        assert_eq!(store.invalidate_prefix("anything"), 0);
    }

    #[test]
    fn test_update_in_place() {
        let mut store = CacheStore::new(10, TTL);
        store.set("user:1", vec!["admin".to_string()], None);
        store.set("user:2", vec!["owner".to_string()], None);

        assert!(store.update("user:1", |roles| roles.push("owner".to_string())));
        assert!(!store.update("user:3", |roles| roles.clear()));

        assert_eq!(
            store.get("user:1"),
            Some(vec!["admin".to_string(), "owner".to_string()])
        );
        assert_eq!(store.get("user:2"), Some(vec!["owner".to_string()]));
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new(100, TTL);

        store.set("key1", "value1", None);
        store.set("key2", "value2", None);
        store.get("key1");
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.total_hits, 2);
        assert!((stats.avg_hits - 1.0).abs() < f64::EPSILON);
        assert!((stats.hit_rate - 0.5).abs() < 1e-9);
        assert_eq!(stats.counters.hits, 2);
        assert_eq!(stats.counters.misses, 1);
        assert!(stats.last_reset.is_none());
    }

    #[test]
    fn test_reset_drops_entries_and_zeroes_counters() {
        let mut store = CacheStore::new(100, TTL);
        store.set("key1", 1, None);
        store.set("key2", 2, None);
        store.get("key1");
        store.get("missing");

        let before = chrono::Utc::now();
        assert_eq!(store.reset(), 2);

        let stats = store.stats();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.counters.hits, 0);
        assert_eq!(stats.counters.misses, 0);
        assert!(stats.last_reset.is_some_and(|at| at >= before));
    }

    #[test]
    fn test_reset_stats_keeps_entries() {
        let mut store = CacheStore::new(100, TTL);
        store.set("key1", 1, None);
        store.get("key1");

        store.reset_stats();

        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().counters.hits, 0);
        assert!(store.last_reset().is_some());
    }
}
