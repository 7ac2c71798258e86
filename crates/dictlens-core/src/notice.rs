//! User-facing lookup notices
//!
//! IMPORTANT: Notice codes are versioned and stable.
//! NEVER rename or remove codes - they are part of the report format.

use serde::{Deserialize, Serialize};

/// Notice code registry (v1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeCode {
    /// The table reference was blank
    EmptyReference,

    /// No dictionary row matched the table reference
    TableNotFound,

    /// Several physical tables matched the table reference
    TableAmbiguous,

    /// A requested field is not in the table
    FieldNotFound,

    /// The resolved table has no indexes
    NoIndexes,

    /// An export was requested with nothing to export
    NothingToExport,
}

impl NoticeCode {
    /// Get the notice code as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyReference => "EMPTY_REFERENCE",
            Self::TableNotFound => "TABLE_NOT_FOUND",
            Self::TableAmbiguous => "TABLE_AMBIGUOUS",
            Self::FieldNotFound => "FIELD_NOT_FOUND",
            Self::NoIndexes => "NO_INDEXES",
            Self::NothingToExport => "NOTHING_TO_EXPORT",
        }
    }

    /// Default severity for this code
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::EmptyReference | Self::TableNotFound | Self::TableAmbiguous => Severity::Error,
            Self::FieldNotFound | Self::NothingToExport => Severity::Warn,
            Self::NoIndexes => Severity::Info,
        }
    }
}

impl std::fmt::Display for NoticeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Notice severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,

    /// Something the user should look at; results are still usable
    Warn,

    /// The lookup produced no result; the user has to resubmit
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A notice with structured metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Stable notice code
    pub code: NoticeCode,

    /// Severity level
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// What the user typed, when relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Candidates the user can pick from (ambiguous matches)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<String>,
}

impl Notice {
    /// Create a notice with the code's default severity
    pub fn new(code: NoticeCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.default_severity(),
            message: message.into(),
            subject: None,
            candidates: Vec::new(),
        }
    }

    /// Set the subject
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the candidate list
    pub fn with_candidates(mut self, candidates: Vec<String>) -> Self {
        self.candidates = candidates;
        self
    }
}
