//! Catalog sources and session collaborators
//!
//! This crate sits at the boundary between the lookup engine and the
//! outside world: it delivers the dictionary/index snapshot the engine
//! works on and receives resolved searches for the history.
//!
//! ## Example
//!
//! ```rust,ignore
//! use dictlens_catalog::{DictionarySource, SnapshotFileSource};
//!
//! let source = SnapshotFileSource::new("catalog.json");
//! source.test_connection().await?;
//! let snapshot = source.fetch_snapshot().await?;
//! ```

pub mod adapter;
pub mod file;
pub mod mock;
pub mod history;

pub use adapter::{DictionarySource, FetchError};
pub use file::SnapshotFileSource;
pub use mock::MockSource;
pub use history::{HistoryError, HistoryStore, InMemoryHistory, SearchHistoryEntry};
