//! Router tests for the state API, driven through `tower::ServiceExt::oneshot`

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use kanban_engine::{seed_document, Document, DocumentStore, FileDocumentStore, KanbanError};
use kanban_server::{build_router, BODY_LIMIT};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn file_router(data_dir: &Path) -> Router {
    build_router(Arc::new(FileDocumentStore::new(data_dir)), None)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_state(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/state")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn test_first_get_seeds_the_store() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("data");
    let router = file_router(&data_dir);

    let (status, body) = send(&router, get("/api/state")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["boards"].as_array().unwrap().len(), 1);
    assert_eq!(body["ui"]["openBoardId"], "board-1");
    assert!(data_dir.join("state.json").is_file());
}

#[tokio::test]
async fn test_post_then_get_round_trip() {
    let temp = TempDir::new().unwrap();
    let router = file_router(temp.path());

    let mut doc = seed_document();
    doc.boards[0].title = "Posted".into();
    doc.meta.updated_at = None;
    let before = Utc::now();

    let (status, ack) = send(&router, post_state(serde_json::to_vec(&doc).unwrap())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["success"], true);
    let saved_at: DateTime<Utc> = serde_json::from_value(ack["savedAt"].clone()).unwrap();
    assert!(saved_at >= before);

    let (status, body) = send(&router, get("/api/state")).await;
    assert_eq!(status, StatusCode::OK);
    let loaded: Document = serde_json::from_value(body).unwrap();
    assert_eq!(loaded.without_timestamp(), doc.without_timestamp());
    assert_eq!(loaded.meta.updated_at, Some(saved_at));
}

#[tokio::test]
async fn test_post_keeps_unknown_fields() {
    let temp = TempDir::new().unwrap();
    let router = file_router(temp.path());
    let body = json!({
        "boards": [],
        "ui": {"openBoardId": null, "theme": "dark"},
        "plugins": {"timer": true}
    });

    let (status, _) = send(&router, post_state(body.to_string())).await;
    assert_eq!(status, StatusCode::OK);

    let (_, loaded) = send(&router, get("/api/state")).await;
    assert_eq!(loaded["ui"]["theme"], "dark");
    assert_eq!(loaded["plugins"]["timer"], true);
}

#[tokio::test]
async fn test_post_rejects_non_objects() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("data");
    let router = file_router(&data_dir);

    for body in ["null", "[]", "42", "\"state\"", "not json"] {
        let (status, error) = send(&router, post_state(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(error, json!({"error": "Invalid state"}));
    }
    // Nothing was written
    assert!(!data_dir.join("state.json").exists());
}

#[tokio::test]
async fn test_post_over_body_limit() {
    let temp = TempDir::new().unwrap();
    let router = file_router(temp.path());
    let padding = "x".repeat(BODY_LIMIT);
    let body = json!({"boards": [], "padding": padding}).to_string();

    let (status, _) = send(&router, post_state(body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_save_failure_is_500() {
    let temp = TempDir::new().unwrap();
    // A regular file where the data directory should be
    let blocker = temp.path().join("data");
    std::fs::write(&blocker, "").unwrap();
    let router = file_router(&blocker);

    let (status, error) = send(&router, post_state("{\"boards\": []}")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error, json!({"error": "Save failed"}));
}

struct UnreachableStore;

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn load(&self) -> kanban_engine::Result<Document> {
        Err(KanbanError::unavailable("backend down"))
    }

    async fn save(&self, _doc: &Document) -> kanban_engine::Result<DateTime<Utc>> {
        Err(KanbanError::persist("backend down"))
    }
}

#[tokio::test]
async fn test_unavailable_store_is_503() {
    let router = build_router(Arc::new(UnreachableStore), None);
    let (status, _) = send(&router, get("/api/state")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_health() {
    let temp = TempDir::new().unwrap();
    let router = file_router(temp.path());
    let (status, body) = send(&router, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert!(body["now"].is_string());
    // Health has no side effects
    assert!(!temp.path().join("state.json").exists());
}

#[tokio::test]
async fn test_static_files_and_cors() {
    let temp = TempDir::new().unwrap();
    let public = temp.path().join("public");
    std::fs::create_dir_all(&public).unwrap();
    std::fs::write(public.join("index.html"), "<h1>Kanban</h1>").unwrap();
    let router = build_router(
        Arc::new(FileDocumentStore::new(temp.path().join("data"))),
        Some(&public),
    );

    let response = router.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<h1>Kanban</h1>");

    let request = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "http://elsewhere.example")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
