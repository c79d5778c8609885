//! AdvanceTask command

use crate::command::{Execute, Outcome};
use crate::defaults::next_stage;
use crate::error::{KanbanError, Result};
use crate::types::{BoardId, ColumnId, Document, TaskId};

/// Move a task to the head of the next workflow stage's column.
///
/// Stages are matched by column title (see [`crate::defaults::STAGE_ORDER`]).
/// The command is a no-op when the current column is not a stage, is the
/// last stage, or the board has no column titled with the next stage.
#[derive(Debug, Clone)]
pub struct AdvanceTask {
    pub board_id: BoardId,
    pub column_id: ColumnId,
    pub task_id: TaskId,
}

impl AdvanceTask {
    pub fn new(
        board_id: impl Into<BoardId>,
        column_id: impl Into<ColumnId>,
        task_id: impl Into<TaskId>,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            column_id: column_id.into(),
            task_id: task_id.into(),
        }
    }
}

impl Execute for AdvanceTask {
    /// Destination column
    type Output = ColumnId;

    fn op(&self) -> &'static str {
        "advance task"
    }

    fn execute(&self, doc: &mut Document) -> Result<Outcome<ColumnId>> {
        doc.require_task(&self.board_id, &self.column_id, &self.task_id)?;
        let board = doc.require_board_mut(&self.board_id)?;

        let current_title = board
            .column(&self.column_id)
            .map(|c| c.title.clone())
            .unwrap_or_default();
        let Some(next_title) = next_stage(&current_title) else {
            return Ok(Outcome::Unchanged);
        };
        let Some(next_id) = board.column_titled(next_title).map(|c| c.id.clone()) else {
            tracing::debug!(stage = next_title, "no column for next stage, advance skipped");
            return Ok(Outcome::Unchanged);
        };

        let task = board
            .column_mut(&self.column_id)
            .and_then(|c| c.remove_task(&self.task_id))
            .ok_or_else(|| KanbanError::TaskNotFound {
                id: self.task_id.to_string(),
            })?;
        if let Some(next) = board.column_mut(&next_id) {
            next.tasks.insert(0, task);
        }
        Ok(Outcome::Mutated(next_id))
    }
}
