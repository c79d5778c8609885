//! MoveTask command

use crate::command::{Execute, Outcome};
use crate::error::{KanbanError, Result};
use crate::types::{BoardId, ColumnId, Document, TaskId};

/// Move a task to an index in the same or another column of its board.
///
/// The task is removed first, then inserted at `target_index` clamped to the
/// destination length after removal. Returns the index actually used.
#[derive(Debug, Clone)]
pub struct MoveTask {
    pub board_id: BoardId,
    pub from_column: ColumnId,
    pub task_id: TaskId,
    pub to_column: ColumnId,
    pub target_index: usize,
}

impl MoveTask {
    pub fn new(
        board_id: impl Into<BoardId>,
        from_column: impl Into<ColumnId>,
        task_id: impl Into<TaskId>,
        to_column: impl Into<ColumnId>,
        target_index: usize,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            from_column: from_column.into(),
            task_id: task_id.into(),
            to_column: to_column.into(),
            target_index,
        }
    }

    /// Reorder within a single column
    pub fn within(
        board_id: impl Into<BoardId>,
        column: impl Into<ColumnId>,
        task_id: impl Into<TaskId>,
        target_index: usize,
    ) -> Self {
        let column = column.into();
        Self::new(board_id, column.clone(), task_id, column, target_index)
    }
}

impl Execute for MoveTask {
    type Output = usize;

    fn op(&self) -> &'static str {
        "move task"
    }

    fn execute(&self, doc: &mut Document) -> Result<Outcome<usize>> {
        // Validate everything before touching the board
        let origin = doc
            .require_column(&self.board_id, &self.from_column)?
            .position(&self.task_id)
            .ok_or_else(|| KanbanError::TaskNotFound {
                id: self.task_id.to_string(),
            })?;
        doc.require_column(&self.board_id, &self.to_column)?;

        let board = doc.require_board_mut(&self.board_id)?;
        let task = board
            .column_mut(&self.from_column)
            .and_then(|c| c.remove_task(&self.task_id))
            .ok_or_else(|| KanbanError::TaskNotFound {
                id: self.task_id.to_string(),
            })?;
        let dest = board
            .column_mut(&self.to_column)
            .ok_or_else(|| KanbanError::ColumnNotFound {
                id: self.to_column.to_string(),
            })?;
        let index = dest.insert_clamped(self.target_index, task);

        if self.from_column == self.to_column && index == origin {
            return Ok(Outcome::Unchanged);
        }
        Ok(Outcome::Mutated(index))
    }
}
