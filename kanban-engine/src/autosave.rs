//! Debounced whole-document autosave
//!
//! Every mutation restarts a single quiet-period timer. Only a timer that
//! runs to completion persists, so a burst of edits produces one save that
//! carries the state as of the last edit.

use crate::cache::StateCache;
use crate::store::DocumentStore;
use crate::types::Document;
use chrono::{DateTime, Local, Utc};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Advisory save indicator
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SaveStatus {
    /// Nothing has been saved or scheduled yet
    #[default]
    Idle,
    /// A save is scheduled
    Pending,
    /// The last save succeeded
    Saved { at: DateTime<Utc> },
    /// The last save failed; the document is kept in memory and the mirror
    Failed { reason: String },
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => Ok(()),
            Self::Pending => f.write_str("Waiting for save..."),
            Self::Saved { at } => {
                write!(f, "Saved {}", at.with_timezone(&Local).format("%H:%M:%S"))
            }
            Self::Failed { .. } => f.write_str("Save failed (offline)"),
        }
    }
}

/// Restartable quiet-period timer in front of a store
pub struct AutosaveScheduler {
    inner: Arc<Inner>,
}

struct Inner {
    document: Arc<RwLock<Document>>,
    store: Arc<dyn DocumentStore>,
    cache: Arc<dyn StateCache>,
    quiet_period: Duration,
    pending: Mutex<Pending>,
    status: watch::Sender<SaveStatus>,
}

#[derive(Default)]
struct Pending {
    /// Bumped on every notify/flush; a timer only fires for its own generation
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl AutosaveScheduler {
    pub fn new(
        document: Arc<RwLock<Document>>,
        store: Arc<dyn DocumentStore>,
        cache: Arc<dyn StateCache>,
        quiet_period: Duration,
    ) -> Self {
        let (status, _) = watch::channel(SaveStatus::Idle);
        Self {
            inner: Arc::new(Inner {
                document,
                store,
                cache,
                quiet_period,
                pending: Mutex::new(Pending::default()),
                status,
            }),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.inner.quiet_period
    }

    /// Current status
    pub fn status(&self) -> SaveStatus {
        self.inner.status.borrow().clone()
    }

    /// Receiver that observes every status change
    pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
        self.inner.status.subscribe()
    }

    /// Whether a timer is waiting to fire
    pub fn is_pending(&self) -> bool {
        self.inner.pending().timer.is_some()
    }

    /// Restart the quiet period. Must be called within a tokio runtime.
    pub fn notify_mutated(&self) {
        let mut pending = self.inner.pending();
        if let Some(timer) = pending.timer.take() {
            timer.abort();
        }
        pending.generation += 1;
        let generation = pending.generation;
        self.inner.status.send_replace(SaveStatus::Pending);

        let inner = Arc::clone(&self.inner);
        pending.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.quiet_period).await;
            {
                let mut pending = inner.pending();
                if pending.generation != generation {
                    return;
                }
                // Detach: from here on the save cannot be aborted
                pending.timer = None;
            }
            inner.persist().await;
        }));
        debug!(generation, "autosave scheduled");
    }

    /// Cancel any pending timer and save now
    pub async fn flush(&self) -> SaveStatus {
        {
            let mut pending = self.inner.pending();
            if let Some(timer) = pending.timer.take() {
                timer.abort();
            }
            pending.generation += 1;
        }
        self.inner.persist().await
    }
}

impl Inner {
    fn pending(&self) -> MutexGuard<'_, Pending> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn persist(&self) -> SaveStatus {
        let snapshot = self.document.read().await.clone();
        self.cache.mirror(&snapshot).await;

        let status = match self.store.save(&snapshot).await {
            Ok(at) => {
                info!(%at, boards = snapshot.boards.len(), "document saved");
                SaveStatus::Saved { at }
            }
            Err(e) => {
                warn!(error = %e, "save failed, document kept locally");
                SaveStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };

        // A newer edit keeps the indicator at Pending
        if self.pending().timer.is_none() {
            self.status.send_replace(status.clone());
        }
        status
    }
}
