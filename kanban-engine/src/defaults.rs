//! Built-in workflow stages, seed content and tuning constants.
//!
//! The stage order is matched against column *titles*: a board only
//! supports `AdvanceTask` if its columns use these exact names.

use crate::types::{Board, BoardId, Column, ColumnId, Document, Meta, Task, TaskId, Ui};
use chrono::Utc;
use std::time::Duration;

/// Workflow stages, first to last
pub const STAGE_ORDER: [&str; 4] = ["TODO", "WIP", "ON CHECK", "DONE"];

/// Quiet period the autosave scheduler waits after the last mutation
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(800);

/// File name offered for exported documents
pub const EXPORT_FILE_NAME: &str = "kanban-export.json";

/// Title given to tasks created from the "add task" button
pub const DEFAULT_TASK_TITLE: &str = "New Task";

/// Title of the seeded document
pub const DEFAULT_DOCUMENT_TITLE: &str = "My Kanban";

/// The stage after `title`, or `None` for the last stage or a non-stage title
pub fn next_stage(title: &str) -> Option<&'static str> {
    let idx = STAGE_ORDER.iter().position(|s| *s == title)?;
    STAGE_ORDER.get(idx + 1).copied()
}

/// Document written on first access to an empty store.
///
/// Ids are fixed so the seed is recognisable across installs.
pub fn seed_document() -> Document {
    let ids = ["col-todo", "col-wip", "col-check", "col-done"];
    let mut columns: Vec<Column> = ids
        .iter()
        .zip(STAGE_ORDER)
        .map(|(id, stage)| Column {
            id: ColumnId::from_string(*id),
            title: stage.to_string(),
            tasks: Vec::new(),
        })
        .collect();

    let mut example = Task::new("Create layout")
        .with_description("Build the landing page")
        .with_labels(["frontend"]);
    example.id = TaskId::from_string("t-1");
    columns[0].tasks.push(example);

    let board = Board {
        id: BoardId::from_string("board-1"),
        title: "Main project".into(),
        columns,
    };

    Document {
        ui: Ui {
            open_board_id: Some(board.id.clone()),
            ..Ui::default()
        },
        boards: vec![board],
        meta: Meta {
            title: Some(DEFAULT_DOCUMENT_TITLE.into()),
            updated_at: Some(Utc::now()),
            ..Meta::default()
        },
        ..Document::default()
    }
}
