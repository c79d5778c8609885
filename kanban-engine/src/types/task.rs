//! Task types: Task, Comment

use super::ids::TaskId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A task/card in a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub due_date: Option<NaiveDate>,
    /// Append-only discussion log
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub comments: Vec<Comment>,
    /// Archived tasks stay in their column but are hidden from views
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub archived: bool,
    /// Fields written by other clients (e.g. `checklist`), kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// Create a new task with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: String::new(),
            labels: Vec::new(),
            due_date: None,
            comments: Vec::new(),
            archived: false,
            extra: Map::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the labels (normalized)
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.labels = normalize_labels(labels);
        self
    }

    /// Case-insensitive match against title, description and labels.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        let haystack = format!(
            "{} {} {}",
            self.title,
            self.description,
            self.labels.join(" ")
        )
        .to_lowercase();
        haystack.contains(needle)
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// A comment on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    #[serde(alias = "when")]
    pub timestamp: DateTime<Utc>,
}

impl Comment {
    /// Create a comment stamped with the current time
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Trim labels, drop empties and duplicates, keep first-seen order.
pub fn normalize_labels<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        let label = label.as_ref().trim();
        if !label.is_empty() && !out.iter().any(|l| l == label) {
            out.push(label.to_string());
        }
    }
    out
}

/// Date inputs submit `""` when cleared
fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Parse a comma separated label list as typed into a form field.
pub fn parse_labels(input: &str) -> Vec<String> {
    normalize_labels(input.split(','))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::new("Test task");
        assert_eq!(task.title, "Test task");
        assert!(task.description.is_empty());
        assert!(task.labels.is_empty());
        assert!(!task.archived);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_parse_labels_trims_and_dedups() {
        assert_eq!(
            parse_labels(" frontend, bug ,,frontend, "),
            vec!["frontend".to_string(), "bug".to_string()]
        );
        assert!(parse_labels("").is_empty());
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let task = Task::new("Create Layout")
            .with_description("landing page")
            .with_labels(["Frontend"]);
        assert!(task.matches("layout"));
        assert!(task.matches("landing"));
        assert!(task.matches("frontend"));
        assert!(!task.matches("backend"));
    }

    #[test]
    fn test_task_reads_legacy_fields() {
        let json = r#"{
            "id": "t-1",
            "title": "Créer layout",
            "description": "Faire la page d'accueil",
            "labels": ["frontend"],
            "dueDate": null,
            "checklist": [],
            "comments": [{"text": "hi", "when": "2024-05-01T10:00:00Z"}],
            "archived": false
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "t-1");
        assert_eq!(task.comments.len(), 1);
        assert_eq!(task.comments[0].text, "hi");
        assert!(task.extra.contains_key("checklist"));

        let out = serde_json::to_value(&task).unwrap();
        assert_eq!(out["checklist"], serde_json::json!([]));
        assert!(out["comments"][0].get("timestamp").is_some());
        assert!(out["dueDate"].is_null());
    }

    #[test]
    fn test_task_missing_optional_fields() {
        // Tasks written by older clients omit `archived`
        let task: Task = serde_json::from_str(r#"{"id": "t-9", "title": "x"}"#).unwrap();
        assert!(!task.archived);
        assert!(task.comments.is_empty());
    }

    #[test]
    fn test_due_date_format() {
        let mut task = Task::new("due");
        task.due_date = NaiveDate::from_ymd_opt(2025, 3, 14);
        let out = serde_json::to_value(&task).unwrap();
        assert_eq!(out["dueDate"], "2025-03-14");

        let back: Task = serde_json::from_value(out).unwrap();
        assert_eq!(back.due_date, task.due_date);
        let cleared: Task =
            serde_json::from_str(r#"{"id": "t-2", "title": "x", "dueDate": ""}"#).unwrap();
        assert_eq!(cleared.due_date, None);
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let json = r#"{
            "id": "t-3",
            "title": "x",
            "description": null,
            "labels": null,
            "comments": null
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description, "");
        assert!(task.labels.is_empty());
        assert!(task.comments.is_empty());
        // Written back as regular values
        let out = serde_json::to_value(&task).unwrap();
        assert_eq!(out["labels"], serde_json::json!([]));
        assert_eq!(out["description"], "");
    }
}
