//! Task commands

mod add;
mod advance;
mod delete;
mod mv;
mod update;

pub use add::CreateTask;
pub use advance::AdvanceTask;
pub use delete::DeleteTask;
pub use mv::MoveTask;
pub use update::UpdateTask;
