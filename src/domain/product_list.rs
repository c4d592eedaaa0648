//! Paginated product-list cache.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheStats, SharedCache};
use crate::domain::keys::{build_product_list_key, ProductListQuery};

/// Only pages `1..=CACHEABLE_PAGES` are stored; deeper pages are rarely
/// repeated.
pub const CACHEABLE_PAGES: i64 = 2;

pub const PRODUCT_LIST_TTL: Duration = Duration::from_secs(5 * 60);

// == Product List Cache ==
/// Caches the first pages of product listings keyed by normalized query.
#[derive(Debug)]
pub struct ProductListCache<V> {
    cache: SharedCache<V>,
    cacheable_pages: i64,
    ttl: Duration,
}

impl<V> Clone for ProductListCache<V> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            cacheable_pages: self.cacheable_pages,
            ttl: self.ttl,
        }
    }
}

impl<V: Clone> ProductListCache<V> {
    pub fn new(max_entries: usize) -> Self {
        Self::with_policy(
            SharedCache::new(max_entries, PRODUCT_LIST_TTL),
            CACHEABLE_PAGES,
            PRODUCT_LIST_TTL,
        )
    }

    pub fn with_policy(cache: SharedCache<V>, cacheable_pages: i64, ttl: Duration) -> Self {
        Self {
            cache,
            cacheable_pages: cacheable_pages.max(0),
            ttl,
        }
    }

    /// True when the normalized page falls inside the cached window.
    pub fn is_cacheable(&self, query: &ProductListQuery) -> bool {
        query.normalized().page <= self.cacheable_pages
    }

    pub async fn get(&self, query: &ProductListQuery) -> Option<V> {
        if !self.is_cacheable(query) {
            return None;
        }
        self.cache.get(&build_product_list_key(query)).await
    }

    pub async fn set(&self, query: &ProductListQuery, page: V) {
        if !self.is_cacheable(query) {
            debug!(page = query.page, "skipping cache for deep page");
            return;
        }
        self.cache
            .set(build_product_list_key(query), page, Some(self.ttl))
            .await;
    }

    // == Load ==
    /// Cache-aside read. Pages past the window go straight to `producer`.
    pub async fn load<F, Fut, E>(&self, query: &ProductListQuery, producer: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if !self.is_cacheable(query) {
            return producer().await;
        }
        self.cache
            .load_or_compute(&build_product_list_key(query), producer, Some(self.ttl))
            .await
    }

    /// Drops every cached listing, e.g. after a product is approved.
    pub async fn invalidate_all(&self) -> usize {
        // Every key matches the empty prefix; count and removal share one lock
        self.cache.invalidate("").await
    }

    /// Drops listings whose key starts with `prefix`.
    pub async fn invalidate(&self, prefix: &str) -> usize {
        self.cache.invalidate(prefix).await
    }

    pub async fn cleanup(&self) -> usize {
        self.cache.cleanup().await
    }

    /// Daily maintenance: drops every listing and restarts the hit, miss and
    /// eviction counters.
    pub async fn daily_reset(&self) -> usize {
        self.cache.reset().await
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Underlying handle, for maintenance tasks.
    pub fn shared(&self) -> &SharedCache<V> {
        &self.cache
    }
}
