//! Document stores: durable holders of the single state document
//!
//! A store loads and saves the *whole* document. There is no partial write
//! and no merge; the last save wins.

mod file;
mod http;

pub use file::FileDocumentStore;
pub use http::HttpDocumentStore;
pub(crate) use file::atomic_write;

use crate::error::Result;
use crate::types::Document;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Durable home of the state document
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load the document, seeding it on first access.
    ///
    /// Fails with `StoreUnavailable` when the store cannot be reached.
    async fn load(&self) -> Result<Document>;

    /// Overwrite the stored document, stamping `meta.updatedAt`.
    ///
    /// Returns the stamp. Fails with `StoreUnavailable` or `PersistFailure`.
    async fn save(&self, doc: &Document) -> Result<DateTime<Utc>>;
}

/// Body returned by a successful `POST /api/state`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAck {
    pub success: bool,
    pub saved_at: DateTime<Utc>,
}

/// Body returned by `GET /api/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub ok: bool,
    pub now: DateTime<Utc>,
}
