//! Comment commands

mod add;

pub use add::AddComment;
