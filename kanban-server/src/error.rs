//! Error types for the kanban server

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kanban_engine::KanbanError;
use serde_json::json;
use thiserror::Error;

/// Result type for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

/// Errors raised by the server and its configuration
#[derive(Debug, Error)]
pub enum ServerError {
    /// Error from the engine
    #[error(transparent)]
    Engine(#[from] KanbanError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(Box<figment::Error>),

    /// A config file was named explicitly but is missing or unsupported
    #[error("config file {path}: {message}")]
    ConfigFile { path: String, message: String },

    /// Listener could not be bound
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ServerError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl ServerError {
    /// HTTP status and public message for this error.
    ///
    /// Messages are fixed strings; details only go to the log.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Engine(KanbanError::InvalidRequestBody { .. }) => {
                (StatusCode::BAD_REQUEST, "Invalid state")
            }
            Self::Engine(KanbanError::StoreUnavailable { .. }) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Store unavailable")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Save failed"),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = %self, %status, "request failed");
        } else {
            tracing::warn!(error = %self, %status, "request rejected");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
