//! Daily Reset Task
//!
//! Once per interval, empties the product-list cache and restarts its lookup
//! counters so `/stats` reports a fresh window. The role cache is never reset
//! here; it only changes through grants, revokes and explicit invalidation.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::domain::ProductListCache;

/// Spawns a task that calls [`ProductListCache::daily_reset`] every
/// `interval`. The first reset happens one full interval after spawning.
pub fn spawn_daily_reset_task<V>(products: ProductListCache<V>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "starting daily reset task");

        loop {
            tokio::time::sleep(interval).await;

            let dropped = products.daily_reset().await;
            info!(dropped, "product list cache reset");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductListQuery;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    #[tokio::test(start_paused = true)]
    async fn test_reset_runs_after_one_interval() {
        let products = ProductListCache::new(10);
        let query = ProductListQuery::page(1, 25);
        products.set(&query, 1u8).await;
        products.get(&query).await;

        let handle = spawn_daily_reset_task(products.clone(), DAY);

        tokio::time::sleep(DAY - Duration::from_secs(1)).await;
        assert_eq!(products.stats().await.size, 1);
        assert!(products.stats().await.last_reset.is_none());

        tokio::time::sleep(Duration::from_secs(2)).await;
        let stats = products.stats().await;
        assert_eq!(stats.size, 0);
        assert_eq!(stats.counters.hits, 0);
        assert!(stats.last_reset.is_some());

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_leaves_role_cache_alone() {
        use crate::domain::{InMemoryRoleStore, Role, RoleCache};

        let products: ProductListCache<u8> = ProductListCache::new(10);
        let roles = RoleCache::new(InMemoryRoleStore::new());
        roles.grant("alice", Role::Owner);

        let handle = spawn_daily_reset_task(products, Duration::from_secs(1));
        tokio::time::sleep(Duration::from_millis(3500)).await;

        assert!(roles.is_owner("alice").await);
        handle.abort();
    }
}
