//! Core types for the kanban engine

mod board;
mod document;
mod ids;
mod task;

// Re-export all types
pub use board::{Board, Column, ColumnMatches};
pub use document::{Document, Meta, Ui};
pub use ids::{BoardId, ColumnId, TaskId};
pub use task::{normalize_labels, parse_labels, Comment, Task};

use serde::{Deserialize, Deserializer};

/// Read an explicit `null` as the field's default, like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
