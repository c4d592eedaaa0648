//! Top-N leaderboard snapshot cache.
//!
//! The full ranking is computed once, stored whole under one key, and every
//! sub-page is served by slicing the stored snapshot.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::cache::{CacheStats, SharedCache};
use crate::domain::keys::build_leaderboard_key;

pub const LEADERBOARD_SIZE: usize = 75;

pub const LEADERBOARD_TTL: Duration = Duration::from_secs(24 * 60 * 60);

// == Leaderboard Cache ==
#[derive(Debug)]
pub struct LeaderboardCache<T> {
    cache: SharedCache<Arc<Vec<T>>>,
    size: usize,
    ttl: Duration,
    key: String,
}

impl<T> Clone for LeaderboardCache<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            size: self.size,
            ttl: self.ttl,
            key: self.key.clone(),
        }
    }
}

impl<T: Clone> LeaderboardCache<T> {
    pub fn new() -> Self {
        Self::with_size(LEADERBOARD_SIZE, LEADERBOARD_TTL)
    }

    pub fn with_size(size: usize, ttl: Duration) -> Self {
        let size = size.max(1);
        Self {
            cache: SharedCache::new(1, ttl),
            size,
            ttl,
            key: build_leaderboard_key(size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    // == Snapshot ==
    /// Returns the full ranking, recomputing it with `producer` when absent.
    ///
    /// The producer's output is truncated to the configured size before it is
    /// stored.
    pub async fn snapshot<F, Fut, E>(&self, producer: F) -> Result<Arc<Vec<T>>, E>
    where
        F: FnOnce(usize) -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        let size = self.size;
        self.cache
            .load_or_compute(
                &self.key,
                || async move {
                    let mut items = producer(size).await?;
                    items.truncate(size);
                    info!(items = items.len(), "computed leaderboard snapshot");
                    Ok::<_, E>(Arc::new(items))
                },
                Some(self.ttl),
            )
            .await
    }

    // == Page ==
    /// Serves `limit` items of page `page` (1-based) from the snapshot.
    ///
    /// Page and limit are clamped to at least 1. Pages beyond the snapshot
    /// come back empty.
    pub async fn page<F, Fut, E>(&self, page: i64, limit: i64, producer: F) -> Result<Vec<T>, E>
    where
        F: FnOnce(usize) -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        let snapshot = self.snapshot(producer).await?;

        let limit = limit.max(1) as usize;
        let start = (page.max(1) as usize - 1).saturating_mul(limit);
        Ok(snapshot.iter().skip(start).take(limit).cloned().collect())
    }

    pub async fn is_cached(&self) -> bool {
        self.cache.has(&self.key).await
    }

    pub async fn invalidate(&self) -> bool {
        self.cache.delete(&self.key).await
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    pub fn shared(&self) -> &SharedCache<Arc<Vec<T>>> {
        &self.cache
    }
}

impl<T: Clone> Default for LeaderboardCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn ranking(n: usize) -> Result<Vec<u32>, String> {
        Ok((1..=n as u32 + 10).collect())
    }

    #[tokio::test]
    async fn test_snapshot_truncated_to_size() {
        let board = LeaderboardCache::new();
        let snapshot = board.snapshot(ranking).await.unwrap();

        assert_eq!(snapshot.len(), LEADERBOARD_SIZE);
        assert_eq!(snapshot[0], 1);
        assert!(board.is_cached().await);
    }

    #[tokio::test]
    async fn test_pages_slice_single_snapshot() {
        let board = LeaderboardCache::new();
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let producer = |n: usize| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            ranking(n).await
        };

        let first = board.page(1, 25, producer).await.unwrap();
        let second = board.page(2, 25, producer).await.unwrap();
        let third = board.page(3, 25, producer).await.unwrap();
        let beyond = board.page(4, 25, producer).await.unwrap();

        assert_eq!(first, (1..=25).collect::<Vec<u32>>());
        assert_eq!(second, (26..=50).collect::<Vec<u32>>());
        assert_eq!(third, (51..=75).collect::<Vec<u32>>());
        assert!(beyond.is_empty());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bad_page_inputs_are_clamped() {
        let board = LeaderboardCache::with_size(10, LEADERBOARD_TTL);

        let page = board.page(0, -4, ranking).await.unwrap();
        assert_eq!(page, vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_expires_after_a_day() {
        let board = LeaderboardCache::new();
        board.snapshot(ranking).await.unwrap();

        tokio::time::advance(LEADERBOARD_TTL - Duration::from_secs(1)).await;
        assert!(board.is_cached().await);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!board.is_cached().await);
    }

    #[tokio::test]
    async fn test_failed_recompute_propagates() {
        let board: LeaderboardCache<u32> = LeaderboardCache::new();

        let result = board
            .page(1, 10, |_| async { Err::<Vec<u32>, _>("timeout".to_string()) })
            .await;

        assert_eq!(result, Err("timeout".to_string()));
        assert!(!board.is_cached().await);
    }

    #[tokio::test]
    async fn test_invalidate_forces_recompute() {
        let board = LeaderboardCache::new();
        board.snapshot(ranking).await.unwrap();

        assert!(board.invalidate().await);
        assert!(!board.invalidate().await);
        assert!(!board.is_cached().await);
    }
}
