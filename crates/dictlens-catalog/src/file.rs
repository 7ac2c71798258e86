//! Snapshot source backed by a JSON file
//!
//! The file holds the payload of one introspection call:
//!
//! ```json
//! {
//!   "data": [{"PHYSICAL_TABLE": "CUSTOMERS", "PHYSICAL_FIELD": "ID", ...}],
//!   "indexes": [{"TABLE_OWNER": "APP", "TABLE_NAME": "CUSTOMERS", ...}],
//!   "index_columns": [{"INDEX_NAME": "PK_CUSTOMERS", "COLUMN_POSITION": 1, ...}]
//! }
//! ```

use crate::adapter::{DictionarySource, FetchError};
use dictlens_core::CatalogSnapshot;
use std::path::{Path, PathBuf};

/// Reads a catalog snapshot from a JSON file
#[derive(Debug, Clone)]
pub struct SnapshotFileSource {
    path: PathBuf,
}

impl SnapshotFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a snapshot where this source will read it
    pub async fn store(&self, snapshot: &CatalogSnapshot) -> Result<(), FetchError> {
        let json = snapshot
            .to_json()
            .map_err(|e| FetchError::InvalidSnapshot(e.to_string()))?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| FetchError::Io(format!("{}: {}", self.path.display(), e)))
    }
}

#[async_trait::async_trait]
impl DictionarySource for SnapshotFileSource {
    fn name(&self) -> &'static str {
        "File"
    }

    async fn fetch_snapshot(&self) -> Result<CatalogSnapshot, FetchError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FetchError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(FetchError::Io(format!("{}: {}", self.path.display(), e))),
        };

        let snapshot = CatalogSnapshot::from_json(&contents)
            .map_err(|e| FetchError::InvalidSnapshot(format!("{}: {}", self.path.display(), e)))?;

        tracing::info!(path = %self.path.display(), "{}", snapshot.summary());

        Ok(snapshot)
    }

    async fn test_connection(&self) -> Result<(), FetchError> {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) if meta.is_file() => Ok(()),
            Ok(_) => Err(FetchError::Configuration(format!(
                "{} is not a file",
                self.path.display()
            ))),
            Err(_) => Err(FetchError::NotFound(self.path.display().to_string())),
        }
    }
}
