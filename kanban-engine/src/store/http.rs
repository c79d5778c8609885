//! HttpDocumentStore - the document behind a kanban server's `/api/state`

use super::{DocumentStore, SaveAck};
use crate::error::{KanbanError, Result};
use crate::types::Document;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::debug;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Store that talks to a remote server over HTTP
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDocumentStore {
    /// Create a store for a server such as `http://localhost:3000`
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self::with_client(base_url, client)
    }

    /// Create a store using a preconfigured client
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn state_url(&self) -> String {
        format!("{}/api/state", self.base_url)
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn load(&self) -> Result<Document> {
        let url = self.state_url();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| KanbanError::unavailable(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KanbanError::unavailable(format!(
                "GET {url} returned {status}"
            )));
        }

        let doc: Document = response
            .json()
            .await
            .map_err(|e| KanbanError::unavailable(format!("GET {url}: unreadable body: {e}")))?;
        debug!(boards = doc.boards.len(), %url, "fetched document");
        Ok(doc)
    }

    async fn save(&self, doc: &Document) -> Result<DateTime<Utc>> {
        let url = self.state_url();
        let response = self
            .client
            .post(&url)
            .json(doc)
            .send()
            .await
            .map_err(|e| KanbanError::unavailable(format!("POST {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KanbanError::persist(format!(
                "POST {url} returned {status}: {body}"
            )));
        }

        let ack: SaveAck = response
            .json()
            .await
            .map_err(|e| KanbanError::persist(format!("POST {url}: unreadable ack: {e}")))?;
        if !ack.success {
            return Err(KanbanError::persist(format!("POST {url}: save not acknowledged")));
        }
        debug!(saved_at = %ack.saved_at, %url, "pushed document");
        Ok(ack.saved_at)
    }
}
