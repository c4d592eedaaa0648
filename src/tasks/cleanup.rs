//! TTL Cleanup Task
//!
//! Background sweep of expired entries. Reads already drop expired entries
//! lazily; the sweep bounds how long unread ones keep memory.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a task that calls [`SharedCache::cleanup`] every `interval`.
///
/// `name` only labels log lines. Abort the returned handle on shutdown.
///
/// # Example
/// ```ignore
/// let products = SharedCache::<String>::new(1000, Duration::from_secs(300));
/// let handle = spawn_cleanup_task("products", products.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_cleanup_task<V>(
    name: &'static str,
    cache: SharedCache<V>,
    interval: Duration,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(cache = name, interval_secs = interval.as_secs(), "starting TTL cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup().await;
            if removed > 0 {
                info!(cache = name, removed, "TTL cleanup removed expired entries");
            } else {
                debug!(cache = name, "TTL cleanup found nothing to remove");
            }
        }
    })
}
