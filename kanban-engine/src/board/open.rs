//! OpenBoard command

use crate::command::{Execute, Outcome};
use crate::error::Result;
use crate::types::{BoardId, Document};

/// Point `ui.openBoardId` at a board
#[derive(Debug, Clone)]
pub struct OpenBoard {
    pub id: BoardId,
}

impl OpenBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }
}

impl Execute for OpenBoard {
    type Output = ();

    fn op(&self) -> &'static str {
        "open board"
    }

    fn execute(&self, doc: &mut Document) -> Result<Outcome<()>> {
        doc.require_board(&self.id)?;
        if doc.ui.open_board_id.as_ref() == Some(&self.id) {
            return Ok(Outcome::Unchanged);
        }
        doc.ui.open_board_id = Some(self.id.clone());
        Ok(Outcome::Mutated(()))
    }
}
