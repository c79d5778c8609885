//! Client-side helpers for the `kanban` command

use crate::config::ServerConfig;
use crate::error::Result;
use kanban_engine::{FileStateCache, Health, HttpDocumentStore, KanbanError, Session};
use std::sync::Arc;
use std::time::Duration;

/// Ask the server whether it is up
pub async fn check_health(server_url: &str) -> Result<Health> {
    let url = format!("{}/api/health", server_url.trim_end_matches('/'));
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .map_err(|e| KanbanError::unavailable(e.to_string()))?;
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| KanbanError::unavailable(format!("GET {url}: {e}")))?;
    if !response.status().is_success() {
        return Err(KanbanError::unavailable(format!(
            "GET {url} returned {}",
            response.status()
        ))
        .into());
    }
    let health = response
        .json()
        .await
        .map_err(|e| KanbanError::unavailable(format!("GET {url}: {e}")))?;
    Ok(health)
}

/// Open a session against the configured server, mirrored to the local cache
pub async fn open_session(config: &ServerConfig) -> Session {
    let store = Arc::new(HttpDocumentStore::new(config.server_url.clone()));
    let cache = Arc::new(FileStateCache::new(&config.cache_path));
    Session::open(store, cache, config.autosave_period()).await
}
