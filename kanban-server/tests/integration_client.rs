//! End-to-end tests: a real server on a random port and an HTTP-backed session

use kanban_engine::{
    task::CreateTask, DocumentStore, FileDocumentStore, HttpDocumentStore, LoadSource,
    MemoryStateCache, SaveStatus, Session, StateCache,
};
use kanban_server::client::{check_health, open_session};
use kanban_server::{start_server, ServerConfig};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

async fn spawn_server(temp: &TempDir) -> (String, tokio::task::JoinHandle<()>) {
    let config = ServerConfig {
        port: 0,
        data_dir: temp.path().join("data"),
        ..ServerConfig::default()
    };
    let (addr, handle) = start_server(&config).await.unwrap();
    (format!("http://{addr}"), handle)
}

#[tokio::test]
async fn test_session_saves_through_server() {
    let temp = TempDir::new().unwrap();
    let (url, handle) = spawn_server(&temp).await;

    let cache = Arc::new(MemoryStateCache::new());
    let session = Session::open(
        Arc::new(HttpDocumentStore::new(url.clone())),
        cache.clone(),
        Duration::from_millis(50),
    )
    .await;
    assert_eq!(session.source(), LoadSource::Store);

    let (board, column) = session
        .read(|doc| {
            let board = doc.open_board().unwrap();
            (board.id.clone(), board.columns[0].id.clone())
        })
        .await;
    let task = session
        .execute(&CreateTask::new(&board, &column).with_title("Over the wire"))
        .await
        .unwrap()
        .into_value()
        .unwrap();

    let status = session.flush().await;
    assert!(matches!(status, SaveStatus::Saved { .. }));

    let on_disk = FileDocumentStore::new(temp.path().join("data"))
        .load()
        .await
        .unwrap();
    let saved = on_disk.require_task(&board, &column, &task.id).unwrap();
    assert_eq!(saved.title, "Over the wire");
    assert_eq!(
        cache.recall().await.without_timestamp(),
        session.snapshot().await.without_timestamp()
    );

    handle.abort();
}

#[tokio::test]
async fn test_health_and_offline_fallback() {
    let temp = TempDir::new().unwrap();
    let (url, handle) = spawn_server(&temp).await;

    let health = check_health(&url).await.unwrap();
    assert!(health.ok);

    // Prime the local mirror while the server is up
    let config = ServerConfig {
        server_url: url.clone(),
        cache_path: temp.path().join("kanban_state.json"),
        autosave_ms: 50,
        ..ServerConfig::default()
    };
    let session = open_session(&config).await;
    assert!(matches!(session.flush().await, SaveStatus::Saved { .. }));
    let online = session.snapshot().await;

    handle.abort();
    let _ = handle.await;

    assert!(check_health(&url).await.is_err());
    let offline = open_session(&config).await;
    assert_eq!(offline.source(), LoadSource::Cache);
    assert_eq!(
        offline.snapshot().await.without_timestamp(),
        online.without_timestamp()
    );
    assert!(matches!(offline.flush().await, SaveStatus::Failed { .. }));
}
