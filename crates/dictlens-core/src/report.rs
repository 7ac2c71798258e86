//! Lookup report schema (stable v1)
//!
//! This schema is STABLE and VERSIONED.
//! Breaking changes require a new version.

use serde::{Deserialize, Serialize};
use crate::model::{ColumnPosition, ResolvedField};
use crate::notice::{Notice, Severity};

/// Report schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportVersion {
    /// Major version (breaking changes)
    pub major: u32,

    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl ReportVersion {
    /// Current report schema version
    pub const CURRENT: ReportVersion = ReportVersion { major: 1, minor: 0 };
}

impl std::fmt::Display for ReportVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Physical and logical name of the resolved table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNames {
    pub physical: String,
    pub logical: String,
}

/// One column of a reported index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexColumnEntry {
    pub name: String,
    pub position: Option<ColumnPosition>,
}

/// One reported index with its columns in position order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntryReport {
    /// Owner-qualified join key
    pub key: String,
    pub name: String,
    pub uniqueness: String,
    pub columns: Vec<IndexColumnEntry>,
}

/// Summary statistics for a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Rows in the field grid
    pub fields: usize,

    /// Rows flagged as not found
    pub missing_fields: usize,

    /// Indexes after consolidation
    pub indexes: usize,

    /// Notices by severity
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

/// Lookup report (lookup.json v1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupReport {
    /// Schema version
    pub version: ReportVersion,

    /// Timestamp (RFC 3339)
    pub timestamp: String,

    /// Table reference as typed
    pub reference: String,

    /// Resolved table, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableNames>,

    /// Field grid
    pub fields: Vec<ResolvedField>,

    /// Consolidated indexes
    pub indexes: Vec<IndexEntryReport>,

    /// Notices raised while resolving
    pub notices: Vec<Notice>,

    /// Summary statistics
    pub summary: ReportSummary,
}

impl LookupReport {
    /// Create an empty report for a reference
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            version: ReportVersion::CURRENT,
            timestamp: chrono::Utc::now().to_rfc3339(),
            reference: reference.into(),
            table: None,
            fields: Vec::new(),
            indexes: Vec::new(),
            notices: Vec::new(),
            summary: ReportSummary::default(),
        }
    }

    /// Record the resolved table
    pub fn with_table(mut self, physical: impl Into<String>, logical: impl Into<String>) -> Self {
        self.table = Some(TableNames {
            physical: physical.into(),
            logical: logical.into(),
        });
        self
    }

    /// Set the field grid
    pub fn with_fields(mut self, fields: Vec<ResolvedField>) -> Self {
        self.summary.fields = fields.len();
        self.summary.missing_fields = fields.iter().filter(|f| f.is_missing()).count();
        self.fields = fields;
        self
    }

    /// Set the index list
    pub fn with_indexes(mut self, indexes: Vec<IndexEntryReport>) -> Self {
        self.summary.indexes = indexes.len();
        self.indexes = indexes;
        self
    }

    /// Add a notice to the report
    pub fn add_notice(&mut self, notice: Notice) {
        match notice.severity {
            Severity::Error => self.summary.errors += 1,
            Severity::Warn => self.summary.warnings += 1,
            Severity::Info => self.summary.info += 1,
        }

        self.notices.push(notice);
    }

    /// Check if the lookup failed
    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = self.to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}
