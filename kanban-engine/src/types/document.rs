//! The persisted document: every board plus view state and metadata

use super::board::{Board, Column};
use super::ids::{BoardId, ColumnId, TaskId};
use super::task::Task;
use crate::error::{KanbanError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Top-level unit of persistence. Always saved and loaded whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub boards: Vec<Board>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub ui: Ui,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub meta: Meta,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// View state that travels with the document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ui {
    #[serde(default)]
    pub open_board_id: Option<BoardId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Free-form metadata; `updatedAt` is stamped by the store on every save
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// An empty document (`boards: []`)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Repair `ui.openBoardId` so it names an existing board.
    ///
    /// Falls back to the first board, or `None` when there are no boards.
    /// Returns true if the pointer changed.
    pub fn heal_open_board(&mut self) -> bool {
        let valid = self
            .ui
            .open_board_id
            .as_ref()
            .is_some_and(|id| self.board(id).is_some());
        if valid {
            return false;
        }
        let healed = self.boards.first().map(|b| b.id.clone());
        let changed = healed != self.ui.open_board_id;
        self.ui.open_board_id = healed;
        changed
    }

    pub fn board(&self, id: &BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| &b.id == id)
    }

    pub fn board_mut(&mut self, id: &BoardId) -> Option<&mut Board> {
        self.boards.iter_mut().find(|b| &b.id == id)
    }

    /// The board referenced by `ui.openBoardId`
    pub fn open_board(&self) -> Option<&Board> {
        self.ui.open_board_id.as_ref().and_then(|id| self.board(id))
    }

    pub fn require_board(&self, id: &BoardId) -> Result<&Board> {
        self.board(id).ok_or_else(|| KanbanError::BoardNotFound { id: id.to_string() })
    }

    pub fn require_board_mut(&mut self, id: &BoardId) -> Result<&mut Board> {
        self.board_mut(id)
            .ok_or_else(|| KanbanError::BoardNotFound { id: id.to_string() })
    }

    pub fn require_column(&self, board_id: &BoardId, column_id: &ColumnId) -> Result<&Column> {
        self.require_board(board_id)?
            .column(column_id)
            .ok_or_else(|| KanbanError::ColumnNotFound {
                id: column_id.to_string(),
            })
    }

    pub fn require_column_mut(
        &mut self,
        board_id: &BoardId,
        column_id: &ColumnId,
    ) -> Result<&mut Column> {
        self.require_board_mut(board_id)?
            .column_mut(column_id)
            .ok_or_else(|| KanbanError::ColumnNotFound {
                id: column_id.to_string(),
            })
    }

    pub fn require_task(
        &self,
        board_id: &BoardId,
        column_id: &ColumnId,
        task_id: &TaskId,
    ) -> Result<&Task> {
        self.require_column(board_id, column_id)?
            .task(task_id)
            .ok_or_else(|| KanbanError::TaskNotFound {
                id: task_id.to_string(),
            })
    }

    pub fn require_task_mut(
        &mut self,
        board_id: &BoardId,
        column_id: &ColumnId,
        task_id: &TaskId,
    ) -> Result<&mut Task> {
        self.require_column_mut(board_id, column_id)?
            .task_mut(task_id)
            .ok_or_else(|| KanbanError::TaskNotFound {
                id: task_id.to_string(),
            })
    }

    /// Labels of every non-archived task on every board
    pub fn labels_in_use(&self) -> BTreeSet<String> {
        self.tasks()
            .filter(|t| !t.archived)
            .flat_map(|t| t.labels.iter().cloned())
            .collect()
    }

    /// Every task in the document, archived included
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.boards
            .iter()
            .flat_map(|b| b.columns.iter())
            .flat_map(|c| c.tasks.iter())
    }

    pub fn task_ids(&self) -> BTreeSet<TaskId> {
        self.tasks().map(|t| t.id.clone()).collect()
    }

    /// Copy of the document without `meta.updatedAt`, for structural comparison
    pub fn without_timestamp(&self) -> Self {
        let mut doc = self.clone();
        doc.meta.updated_at = None;
        doc
    }
}
