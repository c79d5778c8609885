//! Session: the in-memory document, its autosave and the drag gesture
//!
//! A session is the single owner of the editable document. Commands run
//! under its write lock, and every `Mutated` outcome restarts the autosave
//! quiet period.

use crate::autosave::{AutosaveScheduler, SaveStatus};
use crate::cache::StateCache;
use crate::command::{Execute, Outcome};
use crate::error::Result;
use crate::reorder::{rendered_ids, Bounds, ReorderEngine};
use crate::store::DocumentStore;
use crate::transfer::{export_document, parse_import, Export};
use crate::types::{BoardId, ColumnId, Document, TaskId};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

/// Where the session's initial document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Store,
    /// The store was unreachable; the local mirror was used
    Cache,
}

pub struct Session {
    document: Arc<RwLock<Document>>,
    autosave: AutosaveScheduler,
    drag: Mutex<ReorderEngine>,
    source: LoadSource,
}

impl Session {
    /// Load the document and start a session around it.
    ///
    /// Never fails: an unreachable store falls back to the cache.
    pub async fn open(
        store: Arc<dyn DocumentStore>,
        cache: Arc<dyn StateCache>,
        quiet_period: Duration,
    ) -> Self {
        let (mut doc, source) = match store.load().await {
            Ok(doc) => (doc, LoadSource::Store),
            Err(e) => {
                warn!(error = %e, "store unavailable, using local mirror");
                (cache.recall().await, LoadSource::Cache)
            }
        };
        if doc.heal_open_board() {
            debug!(open_board = ?doc.ui.open_board_id, "repaired open board pointer");
        }
        info!(boards = doc.boards.len(), ?source, "session opened");

        let document = Arc::new(RwLock::new(doc));
        let autosave = AutosaveScheduler::new(document.clone(), store, cache, quiet_period);
        Self {
            document,
            autosave,
            drag: Mutex::new(ReorderEngine::new()),
            source,
        }
    }

    pub fn source(&self) -> LoadSource {
        self.source
    }

    /// Run a command; schedule a save if it changed the document
    pub async fn execute<C: Execute>(&self, command: &C) -> Result<Outcome<C::Output>> {
        let outcome = {
            let mut doc = self.document.write().await;
            command.execute(&mut doc)?
        };
        if outcome.is_mutated() {
            debug!(op = command.op(), "document mutated");
            self.autosave.notify_mutated();
        }
        Ok(outcome)
    }

    /// A copy of the current document
    pub async fn snapshot(&self) -> Document {
        self.document.read().await.clone()
    }

    /// Run a read-only closure against the document
    pub async fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&*self.document.read().await)
    }

    /// Receiver for the save indicator
    pub fn status(&self) -> watch::Receiver<SaveStatus> {
        self.autosave.subscribe()
    }

    /// Save now, cancelling any pending autosave
    pub async fn flush(&self) -> SaveStatus {
        self.autosave.flush().await
    }

    // =========================================================================
    // Drag and drop
    // =========================================================================

    pub fn begin_drag(&self, column_id: impl Into<ColumnId>, task_id: impl Into<TaskId>) {
        self.drag().start(column_id, task_id);
    }

    /// Pointer over a rendered task of the dragged-in column
    pub async fn hover_task(
        &self,
        board_id: &BoardId,
        column_id: &ColumnId,
        candidate: &TaskId,
        bounds: Bounds,
        pointer_y: f64,
    ) -> Result<()> {
        let rendered = self
            .read(|doc| doc.require_column(board_id, column_id).map(rendered_ids))
            .await?;
        self.drag().hover(&rendered, candidate, bounds, pointer_y);
        Ok(())
    }

    pub fn hover_empty(&self) {
        self.drag().hover_empty();
    }

    pub fn cancel_drag(&self) {
        self.drag().cancel();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag().is_dragging()
    }

    /// Drop on `column_id` and apply the resolved move.
    ///
    /// Returns the index the task landed at, or `Unchanged` when the drop
    /// resolved to nothing.
    pub async fn drop_on(
        &self,
        board_id: &BoardId,
        column_id: &ColumnId,
    ) -> Result<Outcome<usize>> {
        let resolved = {
            let doc = self.document.read().await;
            let mut drag = self.drag();
            match doc.require_column(board_id, column_id) {
                Ok(column) => drag.release(board_id, column),
                Err(e) => {
                    drag.cancel();
                    Err(e)
                }
            }
        };
        match resolved? {
            Some(mv) => self.execute(&mv).await,
            None => Ok(Outcome::Unchanged),
        }
    }

    fn drag(&self) -> MutexGuard<'_, ReorderEngine> {
        self.drag.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // =========================================================================
    // Export / import
    // =========================================================================

    pub async fn export(&self) -> Result<Export> {
        self.read(export_document).await
    }

    /// Replace the whole document with imported content.
    ///
    /// `confirm` sees the parsed document and may decline. Returns whether
    /// the document was replaced; malformed input is an error and leaves
    /// everything untouched.
    pub async fn import(
        &self,
        bytes: &[u8],
        confirm: impl FnOnce(&Document) -> bool,
    ) -> Result<bool> {
        let mut imported = parse_import(bytes)?;
        if !confirm(&imported) {
            debug!("import declined");
            return Ok(false);
        }
        imported.heal_open_board();
        let boards = imported.boards.len();
        *self.document.write().await = imported;
        self.autosave.notify_mutated();
        info!(boards, "document imported");
        Ok(true)
    }
}
