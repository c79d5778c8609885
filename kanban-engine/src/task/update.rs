//! UpdateTask command

use crate::command::{Execute, Outcome};
use crate::error::Result;
use crate::types::{normalize_labels, BoardId, ColumnId, Document, Task, TaskId};
use chrono::NaiveDate;

/// Update task fields in place. Unset fields are left alone.
#[derive(Debug, Clone)]
pub struct UpdateTask {
    pub board_id: BoardId,
    pub column_id: ColumnId,
    pub task_id: TaskId,
    /// New title; an empty (after trim) title keeps the previous one
    pub title: Option<String>,
    pub description: Option<String>,
    /// Replace all labels
    pub labels: Option<Vec<String>>,
    /// None = don't change, Some(None) = clear, Some(Some(d)) = set
    pub due_date: Option<Option<NaiveDate>>,
    pub archived: Option<bool>,
}

impl UpdateTask {
    pub fn new(
        board_id: impl Into<BoardId>,
        column_id: impl Into<ColumnId>,
        task_id: impl Into<TaskId>,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            column_id: column_id.into(),
            task_id: task_id.into(),
            title: None,
            description: None,
            labels: None,
            due_date: None,
            archived: None,
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the labels (replaces all existing labels)
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Set or clear the due date
    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Archive or restore the task
    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }
}

impl Execute for UpdateTask {
    type Output = Task;

    fn op(&self) -> &'static str {
        "update task"
    }

    fn execute(&self, doc: &mut Document) -> Result<Outcome<Task>> {
        let task = doc.require_task_mut(&self.board_id, &self.column_id, &self.task_id)?;
        let before = task.clone();

        if let Some(title) = self.title.as_deref().map(str::trim) {
            if !title.is_empty() {
                task.title = title.to_string();
            }
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(labels) = &self.labels {
            task.labels = normalize_labels(labels);
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(archived) = self.archived {
            task.archived = archived;
        }

        if *task == before {
            return Ok(Outcome::Unchanged);
        }
        Ok(Outcome::Mutated(task.clone()))
    }
}
