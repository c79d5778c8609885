//! Drag-and-drop reorder engine
//!
//! Tracks a single drag gesture inside one column and turns pointer geometry
//! into a target index for [`MoveTask`]. The view layer reports:
//!
//! 1. `start` when a task is picked up,
//! 2. `hover` for every pointer-over event on a rendered task, or
//!    `hover_empty` over a column with no rendered tasks,
//! 3. `release` or `cancel`.
//!
//! The insertion marker is a slot in the *rendered* sequence (archived tasks
//! are not rendered); slot `i` sits immediately before rendered task `i`.
//! Only same-column drops are accepted.

use crate::error::{KanbanError, Result};
use crate::task::MoveTask;
use crate::types::{BoardId, Column, ColumnId, TaskId};

/// Vertical extent of a rendered task element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Whether `y` falls in the upper half of the box
    pub fn is_upper_half(&self, y: f64) -> bool {
        y - self.top < self.height / 2.0
    }
}

/// Drag gesture state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        column: ColumnId,
        task: TaskId,
        /// Insertion slot in the rendered sequence, once the pointer has moved
        marker: Option<usize>,
    },
}

/// State machine for one drag gesture at a time
#[derive(Debug, Default)]
pub struct ReorderEngine {
    state: DragState,
}

impl ReorderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Current insertion slot, if any
    pub fn marker(&self) -> Option<usize> {
        match &self.state {
            DragState::Dragging { marker, .. } => *marker,
            DragState::Idle => None,
        }
    }

    /// Pick up `task` from `column`. Replaces any gesture in progress.
    pub fn start(&mut self, column: impl Into<ColumnId>, task: impl Into<TaskId>) {
        self.state = DragState::Dragging {
            column: column.into(),
            task: task.into(),
            marker: None,
        };
    }

    /// Pointer moved over a rendered task.
    ///
    /// `rendered` is the column's rendered task ids in display order. The
    /// marker goes before `candidate` when `pointer_y` is in its upper half,
    /// after it otherwise. Ignored while idle or for unknown candidates.
    pub fn hover(
        &mut self,
        rendered: &[TaskId],
        candidate: &TaskId,
        bounds: Bounds,
        pointer_y: f64,
    ) {
        let DragState::Dragging { marker, .. } = &mut self.state else {
            return;
        };
        let Some(idx) = rendered.iter().position(|id| id == candidate) else {
            return;
        };
        *marker = Some(if bounds.is_upper_half(pointer_y) {
            idx
        } else {
            idx + 1
        });
    }

    /// Pointer moved over a column with no rendered tasks
    pub fn hover_empty(&mut self) {
        if let DragState::Dragging { marker, .. } = &mut self.state {
            *marker = Some(0);
        }
    }

    /// Abandon the gesture without mutating anything
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Resolve the drop on `column` into a move.
    ///
    /// The task following the marker (skipping the dragged task) decides the
    /// target: none means append, otherwise its index in the column once the
    /// dragged task is removed. Returns `Ok(None)` when idle or no marker was
    /// placed. Always returns the engine to idle.
    pub fn release(
        &mut self,
        board_id: &BoardId,
        column: &Column,
    ) -> Result<Option<MoveTask>> {
        let DragState::Dragging {
            column: origin,
            task,
            marker,
        } = std::mem::take(&mut self.state)
        else {
            return Ok(None);
        };

        if origin != column.id {
            return Err(KanbanError::CrossColumnDrop {
                task: task.to_string(),
                from: origin.to_string(),
                to: column.id.to_string(),
            });
        }
        if column.position(&task).is_none() {
            return Err(KanbanError::TaskNotFound {
                id: task.to_string(),
            });
        }
        let Some(marker) = marker else {
            return Ok(None);
        };

        let rendered: Vec<&TaskId> = column.visible_tasks().map(|t| &t.id).collect();
        let remaining: Vec<&TaskId> = column
            .tasks
            .iter()
            .map(|t| &t.id)
            .filter(|id| **id != task)
            .collect();

        let following = rendered
            .iter()
            .skip(marker)
            .find(|id| ***id != task);
        let target_index = match following {
            None => remaining.len(),
            Some(next) => remaining
                .iter()
                .position(|id| id == next)
                .unwrap_or(remaining.len()),
        };

        Ok(Some(MoveTask::within(
            board_id.clone(),
            column.id.clone(),
            task,
            target_index,
        )))
    }
}

/// Rendered (non-archived) task ids of a column, in display order
pub fn rendered_ids(column: &Column) -> Vec<TaskId> {
    column.visible_tasks().map(|t| t.id.clone()).collect()
}
