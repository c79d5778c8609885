//! RenameBoard command

use crate::command::{Execute, Outcome};
use crate::error::Result;
use crate::types::{BoardId, Document};

/// Change a board's title. An empty title leaves the board untouched.
#[derive(Debug, Clone)]
pub struct RenameBoard {
    pub id: BoardId,
    pub title: String,
}

impl RenameBoard {
    pub fn new(id: impl Into<BoardId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

impl Execute for RenameBoard {
    type Output = ();

    fn op(&self) -> &'static str {
        "rename board"
    }

    fn execute(&self, doc: &mut Document) -> Result<Outcome<()>> {
        let board = doc.require_board_mut(&self.id)?;
        let title = self.title.trim();
        if title.is_empty() || board.title == title {
            return Ok(Outcome::Unchanged);
        }
        board.title = title.to_string();
        Ok(Outcome::Mutated(()))
    }
}
