//! Supplement Cache - in-process caching for a supplement catalog service
//!
//! Provides a generic TTL cache with cache-aside loading, domain caches for
//! product listings, the top-rated leaderboard and privileged roles, and a
//! persisted prefix index for autocomplete.

pub mod api;
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod tasks;
pub mod trie;

pub use api::AppState;
pub use cache::{CacheStats, CacheStore, SharedCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::{spawn_cleanup_task, spawn_daily_reset_task, spawn_flush_task};
