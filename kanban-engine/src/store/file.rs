//! FileDocumentStore - the document as one JSON file on disk
//!
//! ```text
//! data/
//! ├── state.json   # the document (pretty JSON)
//! └── .lock        # held while a save is in progress
//! ```

use super::DocumentStore;
use crate::defaults::seed_document;
use crate::error::{KanbanError, Result};
use crate::types::Document;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Store backed by `{root}/state.json`
pub struct FileDocumentStore {
    /// Directory holding the state file
    root: PathBuf,
    /// Serializes seeding and saves within this process
    write_guard: Mutex<()>,
}

impl FileDocumentStore {
    /// Create a store for the given data directory. Nothing is touched on disk yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_guard: Mutex::new(()),
        }
    }

    // =========================================================================
    // Path helpers
    // =========================================================================

    /// Get the data directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to state.json
    pub fn state_path(&self) -> PathBuf {
        self.root.join("state.json")
    }

    /// Path to the lock file
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }

    /// Check if a document has been written yet
    pub fn is_initialized(&self) -> bool {
        self.state_path().exists()
    }

    // =========================================================================
    // Document I/O
    // =========================================================================

    /// Read and parse the state file. An empty file reads as an empty document.
    pub async fn read_document(&self) -> Result<Document> {
        let content = fs::read_to_string(self.state_path()).await?;
        if content.trim().is_empty() {
            return Ok(Document::empty());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the state file (atomic write via temp file, under the lock file)
    pub async fn write_document(&self, doc: &Document) -> Result<()> {
        let content = serde_json::to_string_pretty(doc)?;
        fs::create_dir_all(&self.root).await?;
        let _lock = self.lock().await?;
        atomic_write(&self.state_path(), content.as_bytes()).await
    }

    // =========================================================================
    // Locking
    // =========================================================================

    /// Try to acquire an exclusive lock (non-blocking)
    pub async fn lock(&self) -> Result<StoreLock> {
        let lock_path = self.lock_path();

        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(StoreLock { file }),
            Err(_) => Err(KanbanError::persist(format!(
                "state file is locked by another process ({})",
                lock_path.display()
            ))),
        }
    }

    async fn seed(&self) -> Document {
        let seed = seed_document();
        match self.write_document(&seed).await {
            Ok(()) => info!(path = %self.state_path().display(), "seeded new kanban document"),
            Err(e) => warn!(error = %e, "failed to persist seed document"),
        }
        seed
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn load(&self) -> Result<Document> {
        if !self.is_initialized() {
            let _guard = self.write_guard.lock().await;
            // Another caller may have seeded while we waited
            if !self.is_initialized() {
                return Ok(self.seed().await);
            }
        }

        match self.read_document().await {
            Ok(doc) => {
                debug!(boards = doc.boards.len(), "loaded document");
                Ok(doc)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    path = %self.state_path().display(),
                    "unreadable state file, serving empty document"
                );
                Ok(Document::empty())
            }
        }
    }

    async fn save(&self, doc: &Document) -> Result<DateTime<Utc>> {
        let now = Utc::now();
        let mut stamped = doc.clone();
        stamped.meta.updated_at = Some(now);

        let _guard = self.write_guard.lock().await;
        self.write_document(&stamped).await.map_err(|e| match e {
            KanbanError::PersistFailure { .. } => e,
            other => KanbanError::persist(other.to_string()),
        })?;
        debug!(boards = stamped.boards.len(), "saved document");
        Ok(now)
    }
}

/// RAII lock guard - releases on drop
pub struct StoreLock {
    file: std::fs::File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Atomic write via temp file and rename.
///
/// The temp file is flushed to disk before the rename so a crash leaves
/// either the old or the new content, never a truncated file.
pub(crate) async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    // Write to temp file in same directory
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path).await?;
    file.write_all(content).await?;
    file.sync_all().await?;
    drop(file);

    // Rename (atomic on same filesystem)
    fs::rename(&temp_path, path).await?;

    Ok(())
}
