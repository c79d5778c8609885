//! CreateTask command

use crate::command::{Execute, Outcome};
use crate::defaults::DEFAULT_TASK_TITLE;
use crate::error::Result;
use crate::types::{BoardId, ColumnId, Document, Task};

/// Create a task at the head of a column (newest first)
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub board_id: BoardId,
    pub column_id: ColumnId,
    /// Title of the new task; defaults to "New Task"
    pub title: Option<String>,
}

impl CreateTask {
    pub fn new(board_id: impl Into<BoardId>, column_id: impl Into<ColumnId>) -> Self {
        Self {
            board_id: board_id.into(),
            column_id: column_id.into(),
            title: None,
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Execute for CreateTask {
    type Output = Task;

    fn op(&self) -> &'static str {
        "create task"
    }

    fn execute(&self, doc: &mut Document) -> Result<Outcome<Task>> {
        let column = doc.require_column_mut(&self.board_id, &self.column_id)?;

        let title = self
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TASK_TITLE);
        let task = Task::new(title);
        column.tasks.insert(0, task.clone());
        Ok(Outcome::Mutated(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::error::KanbanError;

    fn setup() -> (Document, BoardId, ColumnId) {
        let mut doc = Document::empty();
        let board = CreateBoard::new("Test")
            .execute(&mut doc)
            .unwrap()
            .into_value()
            .unwrap();
        let column = board.columns[0].id.clone();
        (doc, board.id, column)
    }

    #[test]
    fn test_create_task_inserts_at_head() {
        let (mut doc, board, col) = setup();
        let first = CreateTask::new(&board, &col)
            .execute(&mut doc)
            .unwrap()
            .into_value()
            .unwrap();
        let second = CreateTask::new(&board, &col)
            .with_title("Second")
            .execute(&mut doc)
            .unwrap()
            .into_value()
            .unwrap();

        let column = doc.require_column(&board, &col).unwrap();
        assert_eq!(column.task_ids(), vec![second.id, first.id]);
        assert_eq!(column.tasks[1].title, DEFAULT_TASK_TITLE);
        assert_eq!(column.tasks[0].title, "Second");
        assert!(!column.tasks[0].archived);
    }

    #[test]
    fn test_create_task_unknown_column() {
        let (mut doc, board, _) = setup();
        let result = CreateTask::new(&board, "col-missing").execute(&mut doc);
        assert!(matches!(result, Err(KanbanError::ColumnNotFound { .. })));
    }
}
