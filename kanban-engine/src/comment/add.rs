//! AddComment command

use crate::command::{Execute, Outcome};
use crate::error::Result;
use crate::types::{BoardId, ColumnId, Comment, Document, TaskId};

/// Append a timestamped comment to a task. Blank text is ignored.
#[derive(Debug, Clone)]
pub struct AddComment {
    pub board_id: BoardId,
    pub column_id: ColumnId,
    pub task_id: TaskId,
    /// The comment body
    pub text: String,
}

impl AddComment {
    pub fn new(
        board_id: impl Into<BoardId>,
        column_id: impl Into<ColumnId>,
        task_id: impl Into<TaskId>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            column_id: column_id.into(),
            task_id: task_id.into(),
            text: text.into(),
        }
    }
}

impl Execute for AddComment {
    type Output = Comment;

    fn op(&self) -> &'static str {
        "add comment"
    }

    fn execute(&self, doc: &mut Document) -> Result<Outcome<Comment>> {
        let task = doc.require_task_mut(&self.board_id, &self.column_id, &self.task_id)?;

        let text = self.text.trim();
        if text.is_empty() {
            return Ok(Outcome::Unchanged);
        }

        let comment = Comment::new(text);
        task.comments.push(comment.clone());
        Ok(Outcome::Mutated(comment))
    }
}
