//! Mock dictionary source for testing
//!
//! This source returns an in-memory snapshot without touching any
//! database. It's useful for:
//! - Unit testing code that drives a lookup session
//! - Demos without real credentials
//! - Simulating connection failures and slow introspection
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dictlens_catalog::{DictionarySource, MockSource};
//! use dictlens_core::DictionaryRow;
//!
//! let source = MockSource::new();
//! source.add_dictionary_rows(vec![
//!     DictionaryRow::new("CUSTOMERS", "ID", "ANAGRAFICA_CLIENTI", "CODICE"),
//! ]).await;
//!
//! let snapshot = source.fetch_snapshot().await?;
//! ```
//!
//! ## Simulating Failures
//!
//! ```rust,ignore
//! let source = MockSource::new().with_connection_failure();
//! assert!(source.test_connection().await.is_err());
//!
//! let source = MockSource::new().with_latency(100); // 100ms delay
//! ```

use crate::adapter::{DictionarySource, FetchError};
use dictlens_core::{CatalogSnapshot, DictionaryRow, IndexColumnRow, IndexRow};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Mock dictionary source for testing
///
/// Clones share the same snapshot, so rows added through one handle are
/// visible to the others.
#[derive(Clone)]
pub struct MockSource {
    /// Snapshot returned by `fetch_snapshot`
    snapshot: Arc<RwLock<CatalogSnapshot>>,

    /// Error returned by `fetch_snapshot` instead of the snapshot
    fetch_error: Arc<RwLock<Option<FetchError>>>,

    /// Simulate connection failure
    fail_connection: bool,

    /// Simulate introspection latency (milliseconds)
    latency_ms: u64,

    /// Name to return from name() method
    source_name: &'static str,
}

impl MockSource {
    /// Create a new mock source with an empty snapshot
    pub fn new() -> Self {
        Self::from_snapshot(CatalogSnapshot::default())
    }

    /// Create a mock source serving a pre-built snapshot
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
            fetch_error: Arc::new(RwLock::new(None)),
            fail_connection: false,
            latency_ms: 0,
            source_name: "Mock",
        }
    }

    /// Append dictionary rows
    pub async fn add_dictionary_rows(&self, rows: Vec<DictionaryRow>) {
        self.snapshot.write().await.dictionary.extend(rows);
    }

    /// Append index rows
    pub async fn add_indexes(&self, rows: Vec<IndexRow>) {
        self.snapshot.write().await.indexes.extend(rows);
    }

    /// Append index-column rows
    pub async fn add_index_columns(&self, rows: Vec<IndexColumnRow>) {
        self.snapshot.write().await.index_columns.extend(rows);
    }

    /// Make every fetch fail with `error` until cleared
    pub async fn fail_fetch_with(&self, error: FetchError) {
        *self.fetch_error.write().await = Some(error);
    }

    /// Clear a configured fetch error
    pub async fn clear_error(&self) {
        *self.fetch_error.write().await = None;
    }

    /// Configure to fail all connection tests
    pub fn with_connection_failure(mut self) -> Self {
        self.fail_connection = true;
        self
    }

    /// Configure simulated latency for all operations
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Set a custom source name
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.source_name = name;
        self
    }

    /// Number of dictionary rows currently served
    pub async fn field_count(&self) -> usize {
        self.snapshot.read().await.dictionary.len()
    }

    async fn simulate_latency(&self) {
        if self.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.latency_ms)).await;
        }
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DictionarySource for MockSource {
    fn name(&self) -> &'static str {
        self.source_name
    }

    async fn fetch_snapshot(&self) -> Result<CatalogSnapshot, FetchError> {
        self.simulate_latency().await;

        if let Some(error) = self.fetch_error.read().await.as_ref() {
            return Err(error.clone());
        }

        Ok(self.snapshot.read().await.clone())
    }

    async fn test_connection(&self) -> Result<(), FetchError> {
        self.simulate_latency().await;

        if self.fail_connection {
            Err(FetchError::Connection(
                "Simulated connection failure".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}
