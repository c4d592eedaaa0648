//! Vocabulary persistence.
//!
//! Each kind is stored as a JSON array of strings in its own file under a
//! data directory. Saves go through a `.tmp` sibling that is fsynced and then
//! renamed over the target, so a crashed save never leaves a partial file.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::trie::vocabulary::VocabularyKind;

#[derive(Debug, Clone)]
pub struct VocabularyStore {
    dir: PathBuf,
}

impl VocabularyStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, kind: VocabularyKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    // == Load ==
    /// Reads the persisted words for `kind`.
    ///
    /// A missing file surfaces as `CacheError::Io` and malformed content as
    /// `CacheError::Serialization`.
    #[instrument(skip(self))]
    pub async fn load(&self, kind: VocabularyKind) -> Result<Vec<String>> {
        let path = self.path_for(kind);
        let contents = fs::read(&path).await?;
        let words: Vec<String> = serde_json::from_slice(&contents)?;

        debug!(count = words.len(), path = ?path, "vocabulary file read");
        Ok(words)
    }

    // == Save ==
    #[instrument(skip(self, words), fields(count = words.len()))]
    pub async fn save(&self, kind: VocabularyKind, words: &[String]) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(kind);
        let temp_path = path.with_extension("json.tmp");
        let contents = serde_json::to_vec_pretty(words)?;

        {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(&contents).await?;
            file.sync_all().await?;
        }

        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!(path = ?path, "vocabulary file written");
        Ok(())
    }
}
