//! Background Tasks Module
//!
//! Periodic maintenance that runs alongside the server.
//!
//! # Tasks
//! - TTL Cleanup: sweeps expired entries out of a cache
//! - Vocabulary Flush: persists the autocomplete vocabulary when dirty
//! - Daily Reset: empties the product-list cache and restarts its counters

mod cleanup;
mod flush;
mod reset;

pub use cleanup::spawn_cleanup_task;
pub use flush::spawn_flush_task;
pub use reset::spawn_daily_reset_task;
