//! DeleteBoard command

use crate::command::{Execute, Outcome};
use crate::error::{KanbanError, Result};
use crate::types::{BoardId, Document};

/// Remove a board and every task on it.
///
/// The open-board pointer moves to the first remaining board, or is cleared.
#[derive(Debug, Clone)]
pub struct DeleteBoard {
    pub id: BoardId,
}

impl DeleteBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }
}

impl Execute for DeleteBoard {
    type Output = ();

    fn op(&self) -> &'static str {
        "delete board"
    }

    fn execute(&self, doc: &mut Document) -> Result<Outcome<()>> {
        let idx = doc
            .boards
            .iter()
            .position(|b| b.id == self.id)
            .ok_or_else(|| KanbanError::BoardNotFound {
                id: self.id.to_string(),
            })?;
        doc.boards.remove(idx);
        doc.ui.open_board_id = doc.boards.first().map(|b| b.id.clone());
        Ok(Outcome::Mutated(()))
    }
}
