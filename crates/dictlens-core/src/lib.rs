//! dictlens core
//!
//! Domain model shared by the engine, the catalog sources and the CLI.
//! Never rename notice codes - they are part of the report format.

pub mod identifier;
pub mod model;
pub mod notice;
pub mod report;
pub mod config;

pub use identifier::{normalize_identifier, split_owner_and_name, qualify, TableReference};
pub use model::{
    CatalogSnapshot, ColumnPosition, DictionaryRow, FieldStatus, IndexColumnRow, IndexEntry, IndexRow,
    ResolvedField, SnapshotSummary,
};
pub use notice::{Notice, NoticeCode, Severity};
pub use report::{IndexColumnEntry, IndexEntryReport, LookupReport, ReportVersion, TableNames};
pub use config::{Config, ConfigError, HistoryConfig, LookupConfig};
