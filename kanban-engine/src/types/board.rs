//! Board-level types: Board, Column

use super::ids::{BoardId, ColumnId, TaskId};
use super::task::Task;
use serde::{Deserialize, Serialize};

/// A kanban board: an ordered sequence of workflow columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub columns: Vec<Column>,
}

impl Board {
    /// Create a new board with the default workflow columns
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: BoardId::new(),
            title: title.into(),
            columns: Self::default_columns(),
        }
    }

    /// One empty column per workflow stage, in stage order
    pub fn default_columns() -> Vec<Column> {
        crate::defaults::STAGE_ORDER
            .iter()
            .map(|stage| Column::new(*stage))
            .collect()
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| &c.id == id)
    }

    /// Find the column whose title is exactly `title`
    pub fn column_titled(&self, title: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.title == title)
    }

    /// Find the column currently holding a task
    pub fn column_of(&self, task_id: &TaskId) -> Option<&Column> {
        self.columns.iter().find(|c| c.position(task_id).is_some())
    }

    /// Non-archived tasks matching `query` (case-insensitive), grouped by column.
    ///
    /// Columns without matches are kept so views can still render them.
    pub fn search(&self, query: &str) -> Vec<ColumnMatches<'_>> {
        let needle = query.trim().to_lowercase();
        self.filter_tasks(|t| t.matches(&needle))
    }

    /// Non-archived tasks carrying `label`, grouped by column
    pub fn tasks_with_label(&self, label: &str) -> Vec<ColumnMatches<'_>> {
        self.filter_tasks(|t| t.has_label(label))
    }

    fn filter_tasks(&self, pred: impl Fn(&Task) -> bool) -> Vec<ColumnMatches<'_>> {
        self.columns
            .iter()
            .map(|column| ColumnMatches {
                column,
                tasks: column.visible_tasks().filter(|t| pred(t)).collect(),
            })
            .collect()
    }
}

/// Result row of a board-level filter
#[derive(Debug)]
pub struct ColumnMatches<'a> {
    pub column: &'a Column,
    pub tasks: Vec<&'a Task>,
}

/// A column is one workflow stage holding an ordered queue of tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    /// Display name, also matched against the stage order by `AdvanceTask`
    pub title: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ColumnId::new(),
            title: title.into(),
            tasks: Vec::new(),
        }
    }

    /// Index of a task in this column
    pub fn position(&self, task_id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == task_id)
    }

    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| &t.id == task_id)
    }

    /// Splice a task out of the queue
    pub fn remove_task(&mut self, task_id: &TaskId) -> Option<Task> {
        self.position(task_id).map(|idx| self.tasks.remove(idx))
    }

    /// Insert at `index` clamped to `[0, len]`; returns the index used
    pub fn insert_clamped(&mut self, index: usize, task: Task) -> usize {
        let index = index.min(self.tasks.len());
        self.tasks.insert(index, task);
        index
    }

    /// Tasks shown on the board (archived ones are hidden)
    pub fn visible_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.archived)
    }

    pub fn task_ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|t| t.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_with(titles: &[&str]) -> Column {
        let mut col = Column::new("TODO");
        for title in titles {
            col.tasks.push(Task::new(*title));
        }
        col
    }

    #[test]
    fn test_board_creation() {
        let board = Board::new("Test Board");
        assert_eq!(board.title, "Test Board");
        assert!(board.id.as_str().starts_with("board-"));
    }

    #[test]
    fn test_default_columns() {
        let cols = Board::default_columns();
        let titles: Vec<&str> = cols.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["TODO", "WIP", "ON CHECK", "DONE"]);
        assert!(cols.iter().all(|c| c.tasks.is_empty()));
    }

    #[test]
    fn test_insert_clamped() {
        let mut col = column_with(&["A", "B"]);
        let idx = col.insert_clamped(99, Task::new("C"));
        assert_eq!(idx, 2);
        assert_eq!(col.tasks[2].title, "C");
    }

    #[test]
    fn test_remove_task() {
        let mut col = column_with(&["A", "B"]);
        let id = col.tasks[0].id.clone();
        let removed = col.remove_task(&id).unwrap();
        assert_eq!(removed.title, "A");
        assert_eq!(col.tasks.len(), 1);
        assert!(col.remove_task(&id).is_none());
    }

    #[test]
    fn test_search_skips_archived() {
        let mut board = Board::new("b");
        board.columns[0].tasks.push(Task::new("Write docs"));
        let mut archived = Task::new("Old docs");
        archived.archived = true;
        board.columns[0].tasks.push(archived);
        board.columns[1].tasks.push(Task::new("Deploy"));

        let hits = board.search("  DOCS ");
        assert_eq!(hits.len(), 4);
        assert_eq!(hits[0].tasks.len(), 1);
        assert_eq!(hits[0].tasks[0].title, "Write docs");
        assert!(hits[1].tasks.is_empty());
    }

    #[test]
    fn test_tasks_with_label() {
        let mut board = Board::new("b");
        board.columns[2]
            .tasks
            .push(Task::new("x").with_labels(["bug"]));
        board.columns[2].tasks.push(Task::new("y"));
        let hits = board.tasks_with_label("bug");
        assert_eq!(hits[2].tasks.len(), 1);
        assert_eq!(hits[2].tasks[0].title, "x");
    }
}
