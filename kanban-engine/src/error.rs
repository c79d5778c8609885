//! Error types for the kanban engine

use thiserror::Error;

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Errors that can occur in kanban operations
///
/// None of these are fatal to an editing session: the in-memory document
/// and the local mirror stay authoritative when persistence fails.
#[derive(Debug, Error)]
pub enum KanbanError {
    /// The document store could not be reached (transport failure)
    #[error("document store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// The document store rejected or failed a write
    #[error("failed to persist document: {message}")]
    PersistFailure { message: String },

    /// Imported content is not a kanban document
    #[error("malformed input: {message}")]
    MalformedInput { message: String },

    /// A save request body is not a structured document
    #[error("invalid request body: {message}")]
    InvalidRequestBody { message: String },

    /// Board not found
    #[error("board not found: {id}")]
    BoardNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// A task dragged out of one column was dropped on another
    #[error("task {task} from column {from} cannot be dropped on column {to}")]
    CrossColumnDrop {
        task: String,
        from: String,
        to: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KanbanError {
    /// Create a store unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    /// Create a persist failure error
    pub fn persist(message: impl Into<String>) -> Self {
        Self::PersistFailure {
            message: message.into(),
        }
    }

    /// Create a malformed input error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create an invalid request body error
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidRequestBody {
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Errors the session recovers from by falling back to the local mirror
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KanbanError::TaskNotFound {
            id: "abc123".into(),
        };
        assert_eq!(err.to_string(), "task not found: abc123");
    }

    #[test]
    fn test_constructors() {
        let err = KanbanError::malformed("missing boards");
        assert!(err.to_string().contains("missing boards"));
        assert!(matches!(
            KanbanError::persist("disk full"),
            KanbanError::PersistFailure { .. }
        ));
    }

    #[test]
    fn test_offline() {
        assert!(KanbanError::unavailable("connection refused").is_offline());
        assert!(!KanbanError::persist("x").is_offline());
    }
}
