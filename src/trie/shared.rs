//! Shared Vocabulary Handle
//!
//! Cloneable, lock-guarded front for a [`Vocabulary`]. Saves copy the word
//! lists under a read lock and write them with no lock held, so lookups and
//! updates keep flowing while files are fsynced.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::error::Result;
use crate::trie::vocabulary::{ProductNames, Vocabulary, VocabularyKind, VocabularyStats};

// == Shared Vocabulary ==
#[derive(Debug, Clone)]
pub struct SharedVocabulary {
    inner: Arc<RwLock<Vocabulary>>,
    /// Serializes saves so an older snapshot never lands after a newer one
    save_lock: Arc<Mutex<()>>,
}

impl SharedVocabulary {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            inner: Arc::new(RwLock::new(vocabulary)),
            save_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn search(&self, kind: VocabularyKind, prefix: &str, limit: usize) -> Vec<String> {
        self.inner.read().await.search(kind, prefix, limit)
    }

    pub async fn insert(&self, kind: VocabularyKind, text: &str) -> bool {
        self.inner.write().await.insert(kind, text)
    }

    pub async fn batch_update(&self, products: &[ProductNames]) -> usize {
        self.inner.write().await.batch_update(products)
    }

    pub async fn is_dirty(&self) -> bool {
        self.inner.read().await.is_dirty()
    }

    pub async fn stats(&self) -> VocabularyStats {
        self.inner.read().await.stats()
    }

    // == Save ==
    /// Writes the current word lists to disk unconditionally.
    pub async fn save(&self) -> Result<()> {
        self.save_if(false).await.map(|_| ())
    }

    /// Saves only if something changed since the last save. Failures are
    /// logged and leave the vocabulary dirty. Returns whether a save ran.
    pub async fn flush(&self) -> bool {
        match self.save_if(true).await {
            Ok(saved) => saved,
            Err(e) => {
                warn!(error = %e, "vocabulary flush failed");
                false
            }
        }
    }

    async fn save_if(&self, only_dirty: bool) -> Result<bool> {
        let _saving = self.save_lock.lock().await;

        let snapshot = {
            let vocabulary = self.inner.read().await;
            if only_dirty && !vocabulary.is_dirty() {
                debug!("vocabulary clean, skipping save");
                return Ok(false);
            }
            vocabulary.snapshot()
        };

        snapshot.write().await?;

        self.inner.write().await.mark_saved(snapshot.generation());
        Ok(true)
    }
}
