//! HTTP server and command-line client for the kanban engine
//!
//! The server owns the authoritative copy of the document in
//! `{data_dir}/state.json` and exposes it as:
//!
//! | Method | Path          | Result                                         |
//! |--------|---------------|------------------------------------------------|
//! | GET    | `/api/state`  | the whole document                             |
//! | POST   | `/api/state`  | overwrite; `{"success": true, "savedAt": ..}`  |
//! | GET    | `/api/health` | `{"ok": true, "now": ..}`                      |
//!
//! Any other path falls through to the optional static directory.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;

pub use config::{ConfigOverrides, ConfigProvider, ServerConfig};
pub use error::{Result, ServerError};
pub use server::{build_router, start_server, BODY_LIMIT};
