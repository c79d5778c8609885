//! Whole-document export and import, plus validation of save request bodies

use crate::defaults::EXPORT_FILE_NAME;
use crate::error::{KanbanError, Result};
use crate::types::Document;
use serde_json::Value;

/// A document rendered for download
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    /// Suggested file name
    pub file_name: &'static str,
    /// Pretty-printed JSON
    pub contents: String,
}

/// Render `doc` as pretty JSON under the fixed export file name
pub fn export_document(doc: &Document) -> Result<Export> {
    Ok(Export {
        file_name: EXPORT_FILE_NAME,
        contents: serde_json::to_string_pretty(doc)?,
    })
}

/// Parse an import file.
///
/// The content must be a JSON object with a non-null `boards` field that
/// deserializes as a document; anything else is `MalformedInput`.
pub fn parse_import(bytes: &[u8]) -> Result<Document> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| KanbanError::malformed(format!("not valid JSON: {e}")))?;
    let Some(object) = value.as_object() else {
        return Err(KanbanError::malformed("expected a JSON object"));
    };
    if object.get("boards").is_none_or(Value::is_null) {
        return Err(KanbanError::malformed("missing `boards` field"));
    }
    serde_json::from_value(value).map_err(|e| KanbanError::malformed(e.to_string()))
}

/// Validate the body of a save request.
///
/// Only JSON objects are accepted; primitives, arrays and `null` are
/// rejected as `InvalidRequestBody`.
pub fn parse_state_body(bytes: &[u8]) -> Result<Document> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| KanbanError::invalid_body(format!("not valid JSON: {e}")))?;
    if !value.is_object() {
        return Err(KanbanError::invalid_body("expected a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| KanbanError::invalid_body(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::seed_document;

    #[test]
    fn test_export_is_pretty_with_fixed_name() {
        let export = export_document(&seed_document()).unwrap();
        assert_eq!(export.file_name, "kanban-export.json");
        assert!(export.contents.contains("\n  \"boards\""));
    }

    #[test]
    fn test_import_round_trips_export() {
        let seed = seed_document();
        let export = export_document(&seed).unwrap();
        assert_eq!(parse_import(export.contents.as_bytes()).unwrap(), seed);
    }

    #[test]
    fn test_import_rejects_missing_boards() {
        for input in [
            &br#"{"ui": {}}"#[..],
            br#"{"boards": null}"#,
            br#"[1, 2, 3]"#,
            br#""boards""#,
            b"not json",
        ] {
            let result = parse_import(input);
            assert!(
                matches!(result, Err(KanbanError::MalformedInput { .. })),
                "accepted {:?}",
                String::from_utf8_lossy(input)
            );
        }
    }

    #[test]
    fn test_import_rejects_wrong_board_shape() {
        let result = parse_import(br#"{"boards": [{"title": 3}]}"#);
        assert!(matches!(result, Err(KanbanError::MalformedInput { .. })));
    }

    #[test]
    fn test_state_body_accepts_any_object() {
        assert_eq!(parse_state_body(b"{}").unwrap(), Document::empty());
        let doc = parse_state_body(br#"{"boards": [], "custom": 1}"#).unwrap();
        assert_eq!(doc.extra.get("custom"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn test_state_body_rejects_non_objects() {
        for input in [&b"null"[..], b"[]", b"42", b"\"x\"", b"{"] {
            assert!(matches!(
                parse_state_body(input),
                Err(KanbanError::InvalidRequestBody { .. })
            ));
        }
    }
}
