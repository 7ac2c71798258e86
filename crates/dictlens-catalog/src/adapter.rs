//! Dictionary source trait for fetching catalog snapshots

use dictlens_core::CatalogSnapshot;

/// Errors that can occur when fetching a snapshot
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Snapshot not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Trait for collaborators that deliver the dictionary and index lists
///
/// A source is queried once per session ("connect"); the engine then works
/// on the returned snapshot only.
#[async_trait::async_trait]
pub trait DictionarySource: Send + Sync {
    /// Get the source name (e.g., "File", "Mock")
    fn name(&self) -> &'static str;

    /// Fetch the dictionary, index and index-column lists
    async fn fetch_snapshot(&self) -> Result<CatalogSnapshot, FetchError>;

    /// Check that the source is reachable before fetching
    async fn test_connection(&self) -> Result<(), FetchError>;
}
