//! Opaque identifiers for boards, columns and tasks.
//!
//! Ids are generated as `{prefix}-{ulid}` at creation time and never reused.
//! Any string is accepted on read so documents written by other clients
//! (e.g. `board-1`, `col-todo`) load unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh id
            pub fn new() -> Self {
                Self(format!("{}-{}", $prefix, ulid::Ulid::new().to_string().to_lowercase()))
            }

            /// Wrap an existing id string
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&$name> for $name {
            fn from(id: &$name) -> Self {
                id.clone()
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id!(
    /// Board identifier
    BoardId,
    "board"
);
define_id!(
    /// Column identifier, unique within its board
    ColumnId,
    "col"
);
define_id!(
    /// Task identifier, unique within its board
    TaskId,
    "t"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_prefixed_and_unique() {
        let a = TaskId::new();
        let b = TaskId::new();
        assert!(a.as_str().starts_with("t-"));
        assert_ne!(a, b);
        assert!(BoardId::new().as_str().starts_with("board-"));
        assert!(ColumnId::new().as_str().starts_with("col-"));
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ColumnId::from_string("col-todo");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"col-todo\"");
        let parsed: ColumnId = serde_json::from_str("\"col-x\"").unwrap();
        assert_eq!(parsed, "col-x");
    }
}
