//! Cache Module
//!
//! Provides bounded in-memory caching with TTL expiration, oldest-first
//! eviction and a cache-aside loader.

mod entry;
mod order;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use order::InsertionOrder;
pub use shared::SharedCache;
pub use stats::{CacheStats, LookupCounters};
pub use store::CacheStore;
