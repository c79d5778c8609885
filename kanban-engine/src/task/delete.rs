//! DeleteTask command

use crate::command::{Execute, Outcome};
use crate::error::{KanbanError, Result};
use crate::types::{BoardId, ColumnId, Document, Task, TaskId};

/// Splice a task out of its column
#[derive(Debug, Clone)]
pub struct DeleteTask {
    pub board_id: BoardId,
    pub column_id: ColumnId,
    pub task_id: TaskId,
}

impl DeleteTask {
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

impl Execute for DeleteTask {
    type Output = Task;

    fn op(&self) -> &'static str {
        "delete task"
    }

    fn execute(&self, doc: &mut Document) -> Result<Outcome<Task>> {
        let column = doc.require_column_mut(&self.board_id, &self.column_id)?;
        let task = column
            .remove_task(&self.task_id)
            .ok_or_else(|| KanbanError::TaskNotFound {
                id: self.task_id.to_string(),
            })?;
        Ok(Outcome::Mutated(task))
    }
}
