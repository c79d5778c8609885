//! Kanban board engine with debounced whole-document persistence
//!
//! All state lives in one [`Document`]: every board, the UI pointer to the
//! open board and a little metadata. The document is edited in memory
//! through command structs and saved whole, after a quiet period, to a
//! [`DocumentStore`]. A [`StateCache`] mirrors every save attempt so an
//! unreachable store never loses work.
//!
//! ## Overview
//!
//! - **Whole-document saves** - no partial writes, no merge; last save wins
//! - **Debounced** - a burst of edits produces a single save
//! - **Offline tolerant** - failed saves keep the document in memory and in
//!   the local mirror
//! - **Stage workflow** - tasks advance through `TODO → WIP → ON CHECK → DONE`
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use kanban_engine::{
//!     task::CreateTask, FileDocumentStore, FileStateCache, Session, DEFAULT_QUIET_PERIOD,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> kanban_engine::Result<()> {
//! let store = Arc::new(FileDocumentStore::new("data"));
//! let cache = Arc::new(FileStateCache::new("data/kanban_state.json"));
//! let session = Session::open(store, cache, DEFAULT_QUIET_PERIOD).await;
//!
//! let (board, column) = session
//!     .read(|doc| {
//!         let board = doc.open_board().expect("seeded board");
//!         (board.id.clone(), board.columns[0].id.clone())
//!     })
//!     .await;
//! session
//!     .execute(&CreateTask::new(board, column).with_title("Write docs"))
//!     .await?;
//!
//! // Save before exiting instead of waiting out the quiet period
//! session.flush().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Structure
//!
//! ```text
//! data/
//! ├── state.json   # the document (pretty JSON)
//! └── .lock        # exclusive lock held during saves
//! ```

pub mod autosave;
pub mod board;
pub mod cache;
pub mod command;
pub mod comment;
pub mod defaults;
pub mod error;
pub mod reorder;
pub mod session;
pub mod store;
pub mod task;
pub mod transfer;
pub mod types;

// Re-export main types
pub use autosave::{AutosaveScheduler, SaveStatus};
pub use cache::{FileStateCache, MemoryStateCache, StateCache};
pub use command::{Execute, Outcome};
pub use defaults::{next_stage, seed_document, DEFAULT_QUIET_PERIOD, STAGE_ORDER};
pub use error::{KanbanError, Result};
pub use reorder::{Bounds, DragState, ReorderEngine};
pub use session::{LoadSource, Session};
pub use store::{DocumentStore, FileDocumentStore, Health, HttpDocumentStore, SaveAck};
pub use transfer::{export_document, parse_import, parse_state_body, Export};
pub use types::*;
