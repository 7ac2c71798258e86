//! Search history collaborator
//!
//! Resolved searches are posted here fire-and-forget; rendering never
//! waits on the store.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A resolved table search
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    /// Physical table name
    pub physical: String,

    /// Logical table name
    pub logical: String,
}

impl SearchHistoryEntry {
    pub fn new(physical: impl Into<String>, logical: impl Into<String>) -> Self {
        Self {
            physical: physical.into(),
            logical: logical.into(),
        }
    }
}

impl std::fmt::Display for SearchHistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.physical, self.logical)
    }
}

/// Errors raised by a history store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("History store unavailable: {0}")]
    Unavailable(String),
}

/// Trait for stores that remember resolved searches
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// Record a search; returns false when the entry was already known
    async fn record(&self, entry: SearchHistoryEntry) -> Result<bool, HistoryError>;

    /// All entries, sorted by physical name ignoring case
    async fn entries(&self) -> Result<Vec<SearchHistoryEntry>, HistoryError>;
}

/// Process-local history store
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    entries: Arc<RwLock<Vec<SearchHistoryEntry>>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl HistoryStore for InMemoryHistory {
    async fn record(&self, entry: SearchHistoryEntry) -> Result<bool, HistoryError> {
        let mut entries = self.entries.write().await;

        if entries.contains(&entry) {
            return Ok(false);
        }

        tracing::debug!(entry = %entry, "recording search");
        entries.push(entry);
        entries.sort_by_key(|e| e.physical.to_lowercase());

        Ok(true)
    }

    async fn entries(&self) -> Result<Vec<SearchHistoryEntry>, HistoryError> {
        Ok(self.entries.read().await.clone())
    }
}
