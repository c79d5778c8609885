//! Command trait for Board Model mutations
//!
//! Commands are structs where the fields are the parameters. Each one runs
//! synchronously against a `&mut Document` and reports whether it changed
//! anything, so callers only schedule a save for real mutations.
//!
//! ```
//! use kanban_engine::{board::CreateBoard, Document, Execute};
//!
//! let mut doc = Document::empty();
//! let board = CreateBoard::new("Roadmap").execute(&mut doc)?.into_value();
//! assert_eq!(doc.ui.open_board_id, board.map(|b| b.id));
//! # Ok::<(), kanban_engine::KanbanError>(())
//! ```

use crate::error::Result;
use crate::types::Document;

/// Result of a successful command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The document changed; an autosave should follow
    Mutated(T),
    /// The command was a no-op
    Unchanged,
}

impl<T> Outcome<T> {
    pub fn is_mutated(&self) -> bool {
        matches!(self, Self::Mutated(_))
    }

    /// The produced value, if the document changed
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Mutated(value) => Some(value),
            Self::Unchanged => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Mutated(value) => Outcome::Mutated(f(value)),
            Self::Unchanged => Outcome::Unchanged,
        }
    }
}

/// A Board Model operation
pub trait Execute {
    type Output;

    /// Operation name used in logs, e.g. `"move task"`
    fn op(&self) -> &'static str;

    /// Apply the operation. On error the document is left untouched.
    fn execute(&self, doc: &mut Document) -> Result<Outcome<Self::Output>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_helpers() {
        let mutated = Outcome::Mutated(2);
        assert!(mutated.is_mutated());
        assert_eq!(mutated.clone().map(|v| v * 2), Outcome::Mutated(4));
        assert_eq!(mutated.into_value(), Some(2));

        let unchanged: Outcome<i32> = Outcome::Unchanged;
        assert!(!unchanged.is_mutated());
        assert_eq!(unchanged.into_value(), None);
    }
}
