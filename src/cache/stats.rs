//! Cache Statistics Module
//!
//! Diagnostic snapshot of a cache store plus lifetime lookup counters.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Lookup Counters ==
/// Lifetime counters maintained by the store as operations happen.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct LookupCounters {
    /// Reads that returned a live value
    pub hits: u64,
    /// Reads that found nothing or an expired entry
    pub misses: u64,
    /// Entries dropped to respect capacity
    pub evictions: u64,
    /// Entries dropped because their TTL elapsed
    pub expirations: u64,
}

impl LookupCounters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }
}

// == Cache Stats ==
/// Point-in-time view of a cache store.
///
/// `total_hits`, `avg_hits` and `hit_rate` are derived from the hit counts of
/// the entries currently resident. `hit_rate` is `total_hits / (total_hits +
/// size)`: it approximates effectiveness without knowing misses and is kept
/// for parity with existing dashboards. Use [`CacheStats::lookup_hit_rate`]
/// for a real hit/miss ratio.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of entries currently stored
    pub size: usize,
    /// Sum of hit counts across resident entries
    pub total_hits: u64,
    /// Mean hit count per resident entry
    pub avg_hits: f64,
    /// Approximate effectiveness, see type docs
    pub hit_rate: f64,
    /// Configured capacity
    pub capacity: usize,
    #[serde(flatten)]
    pub counters: LookupCounters,
    /// When the counters were last zeroed, if ever
    pub last_reset: Option<DateTime<Utc>>,
}

impl CacheStats {
    // == Constructor ==
    /// Builds a snapshot from resident hit counts and lifetime counters.
    pub fn from_resident<I>(hit_counts: I, capacity: usize, counters: LookupCounters) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        let mut size = 0usize;
        let mut total_hits = 0u64;
        for hits in hit_counts {
            size += 1;
            total_hits += hits;
        }

        let (avg_hits, hit_rate) = if size > 0 {
            (
                total_hits as f64 / size as f64,
                total_hits as f64 / (total_hits as f64 + size as f64),
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            size,
            total_hits,
            avg_hits,
            hit_rate,
            capacity,
            counters,
            last_reset: None,
        }
    }

    // == Lookup Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn lookup_hit_rate(&self) -> f64 {
        let total = self.counters.hits + self.counters.misses;
        if total == 0 {
            0.0
        } else {
            self.counters.hits as f64 / total as f64
        }
    }
}
