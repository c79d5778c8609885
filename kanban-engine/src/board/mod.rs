//! Board commands

mod create;
mod delete;
mod open;
mod rename;

pub use create::CreateBoard;
pub use delete::DeleteBoard;
pub use open::OpenBoard;
pub use rename::RenameBoard;
