//! Local mirror of the last document handed to a save
//!
//! The mirror is best-effort: a failed write is logged and swallowed, and an
//! unreadable mirror recalls as an empty document.

use crate::error::Result;
use crate::store::atomic_write;
use crate::types::Document;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Best-effort local copy of the document
#[async_trait]
pub trait StateCache: Send + Sync {
    /// Remember `doc`. Never fails; problems are logged.
    async fn mirror(&self, doc: &Document);

    /// The last mirrored document, or an empty one
    async fn recall(&self) -> Document;
}

/// Mirror kept in a single JSON file
#[derive(Debug, Clone)]
pub struct FileStateCache {
    path: PathBuf,
}

impl FileStateCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&self, doc: &Document) -> Result<()> {
        let content = serde_json::to_vec(doc)?;
        atomic_write(&self.path, &content).await
    }

    async fn read(&self) -> Result<Document> {
        let content = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&content)?)
    }
}

#[async_trait]
impl StateCache for FileStateCache {
    async fn mirror(&self, doc: &Document) {
        match self.write(doc).await {
            Ok(()) => debug!(path = %self.path.display(), "mirrored document"),
            Err(e) => warn!(error = %e, path = %self.path.display(), "failed to mirror document"),
        }
    }

    async fn recall(&self) -> Document {
        if !self.path.exists() {
            return Document::empty();
        }
        self.read().await.unwrap_or_else(|e| {
            warn!(
                error = %e,
                path = %self.path.display(),
                "unreadable mirror, recalling empty document"
            );
            Document::empty()
        })
    }
}

/// Mirror held in memory; lost with the process
#[derive(Debug, Default)]
pub struct MemoryStateCache {
    doc: Mutex<Option<Document>>,
}

impl MemoryStateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that already holds `doc`
    pub fn with_document(doc: Document) -> Self {
        Self {
            doc: Mutex::new(Some(doc)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Document>> {
        self.doc.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl StateCache for MemoryStateCache {
    async fn mirror(&self, doc: &Document) {
        *self.slot() = Some(doc.clone());
    }

    async fn recall(&self) -> Document {
        self.slot().clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::seed_document;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_cache_recalls_last_mirror() {
        let temp = TempDir::new().unwrap();
        let cache = FileStateCache::new(temp.path().join("cache/kanban_state.json"));
        assert_eq!(cache.recall().await, Document::empty());

        let seed = seed_document();
        cache.mirror(&Document::empty()).await;
        cache.mirror(&seed).await;
        assert_eq!(cache.recall().await, seed);
    }

    #[tokio::test]
    async fn test_unreadable_mirror_recalls_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kanban_state.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert_eq!(FileStateCache::new(path).recall().await, Document::empty());
    }

    #[tokio::test]
    async fn test_mirror_failure_is_swallowed() {
        let temp = TempDir::new().unwrap();
        // The parent "directory" is a regular file
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let cache = FileStateCache::new(blocker.join("kanban_state.json"));

        cache.mirror(&seed_document()).await;
        assert_eq!(cache.recall().await, Document::empty());
    }

    #[tokio::test]
    async fn test_memory_cache() {
        let cache = MemoryStateCache::new();
        assert_eq!(cache.recall().await, Document::empty());
        let seed = seed_document();
        cache.mirror(&seed).await;
        assert_eq!(cache.recall().await, seed);
    }
}
