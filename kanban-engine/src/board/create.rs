//! CreateBoard command

use crate::command::{Execute, Outcome};
use crate::error::{KanbanError, Result};
use crate::types::{Board, Document};

/// Append a new board with the default workflow columns and open it
#[derive(Debug, Clone)]
pub struct CreateBoard {
    /// The board title
    pub title: String,
}

impl CreateBoard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Execute for CreateBoard {
    type Output = Board;

    fn op(&self) -> &'static str {
        "create board"
    }

    fn execute(&self, doc: &mut Document) -> Result<Outcome<Board>> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(KanbanError::invalid_value("title", "board title is empty"));
        }

        let board = Board::new(title);
        doc.ui.open_board_id = Some(board.id.clone());
        doc.boards.push(board.clone());
        Ok(Outcome::Mutated(board))
    }
}
