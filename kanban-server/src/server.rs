//! HTTP document store: `GET`/`POST /api/state` over a [`DocumentStore`]

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use kanban_engine::{
    parse_state_body, Document, DocumentStore, FileDocumentStore, Health, KanbanError, SaveAck,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

/// Largest accepted request body
pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Clone)]
struct AppState {
    store: Arc<dyn DocumentStore>,
}

/// Build the router: the state API, health, and optionally static files at `/`
pub fn build_router(store: Arc<dyn DocumentStore>, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/api/state", get(get_state).post(save_state))
        .route("/api/health", get(health_check))
        .with_state(AppState { store });

    let router = match static_dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "serving static files");
            api.fallback_service(ServeDir::new(dir))
        }
        None => api,
    };

    router
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve in a background task.
///
/// Returns the bound address (useful with port 0) and the server task;
/// abort the handle to shut down.
pub async fn start_server(config: &ServerConfig) -> Result<(SocketAddr, JoinHandle<()>)> {
    let store = Arc::new(FileDocumentStore::new(&config.data_dir));
    let router = build_router(store, config.static_dir.as_deref());

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    let local_addr = listener.local_addr()?;
    info!(
        addr = %local_addr,
        data_dir = %config.data_dir.display(),
        "kanban server listening"
    );

    let server_task = tokio::spawn(async move {
        match axum::serve(listener, router).await {
            Ok(()) => info!("kanban server stopped"),
            Err(e) => error!(error = %e, "kanban server error"),
        }
    });

    Ok((local_addr, server_task))
}

async fn get_state(State(state): State<AppState>) -> Result<Json<Document>> {
    let doc = state.store.load().await.map_err(|e| match e {
        KanbanError::StoreUnavailable { .. } => e,
        other => KanbanError::unavailable(other.to_string()),
    })?;
    Ok(Json(doc))
}

async fn save_state(State(state): State<AppState>, body: Bytes) -> Result<Json<SaveAck>> {
    let doc = parse_state_body(&body)?;
    let saved_at = state.store.save(&doc).await?;
    info!(boards = doc.boards.len(), %saved_at, "state saved");
    Ok(Json(SaveAck {
        success: true,
        saved_at,
    }))
}

async fn health_check() -> Json<Health> {
    Json(Health {
        ok: true,
        now: Utc::now(),
    })
}
