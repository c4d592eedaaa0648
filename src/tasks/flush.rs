//! Vocabulary Flush Task
//!
//! Periodically persists the autocomplete vocabulary when it has changed.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::trie::SharedVocabulary;

/// Spawns a task that calls [`SharedVocabulary::flush`] every `interval`.
///
/// Clean vocabularies are skipped, so an idle service does not rewrite its
/// files. Failures are logged by `flush` and retried on the next tick.
pub fn spawn_flush_task(vocabulary: SharedVocabulary, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "starting vocabulary flush task");

        loop {
            tokio::time::sleep(interval).await;

            let saved = vocabulary.flush().await;
            if saved {
                info!("vocabulary flushed");
            } else {
                debug!("vocabulary flush skipped");
            }
        }
    })
}
