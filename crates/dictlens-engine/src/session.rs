//! Lookup session: one snapshot, one active table at a time
//!
//! The engine itself holds no mutable state. [`SessionState`] is passed in
//! and returned by every submission; the previous state is consumed so a
//! resolved context is always replaced wholesale.

use crate::export::{export_fields_as_text, export_indexes_as_text, ExportError};
use crate::field_resolver::resolve_fields;
use crate::index_consolidator::{consolidate_indexes, ConsolidatedIndexes};
use crate::table_matcher::{resolve_table, MatchPass, TableCandidate, TableMatch};
use dictlens_core::{
    CatalogSnapshot, LookupConfig, LookupReport, Notice, NoticeCode, ResolvedField, TableReference,
};

/// A table lookup as submitted by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupRequest {
    /// Table reference (physical or logical, optionally owner-qualified)
    pub table: String,

    /// Free-text field list; blank means every field
    pub fields: String,
}

impl LookupRequest {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            fields: String::new(),
        }
    }

    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = fields.into();
        self
    }
}

/// Table and index data of the currently resolved table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTableContext {
    pub physical_table: String,
    pub logical_table: String,
    /// Single-owner, deduplicated index data of the table
    pub indexes: ConsolidatedIndexes,
}

/// A successful lookup: the field grid and the index grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub request: LookupRequest,
    pub pass: MatchPass,
    pub context: ResolvedTableContext,
    pub fields: Vec<ResolvedField>,
}

impl Lookup {
    /// Tab-separated field grid
    pub fn fields_text(&self) -> String {
        export_fields_as_text(&self.fields)
    }

    /// Index block for the resolved table
    pub fn indexes_text(&self) -> Result<String, ExportError> {
        export_indexes_as_text(
            &self.context.physical_table,
            &self.context.indexes.indexes,
            &self.context.indexes.columns,
        )
    }

    /// Notices worth surfacing next to the grids
    pub fn notices(&self) -> Vec<Notice> {
        let mut notices: Vec<Notice> = self
            .fields
            .iter()
            .filter(|f| f.is_missing())
            .map(|f| {
                Notice::new(
                    NoticeCode::FieldNotFound,
                    format!("Field {} not found in {}", f.row.physical_field, self.context.physical_table),
                )
                .with_subject(f.row.physical_field.clone())
            })
            .collect();

        if self.context.indexes.is_empty() {
            notices.push(
                Notice::new(
                    NoticeCode::NoIndexes,
                    format!("No indexes found for table {}", self.context.physical_table),
                )
                .with_subject(self.context.physical_table.clone()),
            );
        }

        notices
    }

    /// Report for this lookup
    pub fn to_report(&self) -> LookupReport {
        let mut report = LookupReport::new(self.request.table.clone())
            .with_table(self.context.physical_table.clone(), self.context.logical_table.clone())
            .with_fields(self.fields.clone())
            .with_indexes(self.context.indexes.to_report());

        for notice in self.notices() {
            report.add_notice(notice);
        }

        report
    }
}

/// Why a lookup produced no table. Every variant is recoverable by
/// submitting a new reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Enter a table name")]
    EmptyReference,

    #[error("Table {reference} not found in the dictionary")]
    NotFound { reference: String },

    #[error("Several tables match {reference}, be more specific: {listing}")]
    Ambiguous {
        reference: String,
        candidates: Vec<TableCandidate>,
        more: bool,
        listing: String,
    },
}

impl LookupError {
    /// Notice describing this outcome
    pub fn to_notice(&self) -> Notice {
        match self {
            Self::EmptyReference => Notice::new(NoticeCode::EmptyReference, self.to_string()),
            Self::NotFound { reference } => {
                Notice::new(NoticeCode::TableNotFound, self.to_string()).with_subject(reference.clone())
            }
            Self::Ambiguous { reference, candidates, .. } => {
                Notice::new(NoticeCode::TableAmbiguous, self.to_string())
                    .with_subject(reference.clone())
                    .with_candidates(candidates.iter().map(ToString::to_string).collect())
            }
        }
    }

    /// Report for a failed lookup
    pub fn to_report(&self, reference: &str) -> LookupReport {
        let mut report = LookupReport::new(reference);
        report.add_notice(self.to_notice());
        report
    }
}

/// Resolution engine over one catalog snapshot
#[derive(Debug, Clone, Default)]
pub struct LookupEngine {
    snapshot: CatalogSnapshot,
    config: LookupConfig,
}

impl LookupEngine {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot,
            config: LookupConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LookupConfig) -> Self {
        self.config = config;
        self
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Resolve a table and compute both grids.
    ///
    /// The field grid and the index grid are independent of each other;
    /// both derive from the resolved physical table.
    pub fn lookup(&self, request: &LookupRequest) -> Result<Lookup, LookupError> {
        let reference = TableReference::parse(&request.table);
        if reference.is_empty() {
            return Err(LookupError::EmptyReference);
        }

        let table = match resolve_table(&request.table, &self.snapshot.dictionary, self.config.candidate_limit) {
            TableMatch::Resolved(table) => table,
            TableMatch::Ambiguous(ambiguous) => {
                return Err(LookupError::Ambiguous {
                    reference: reference.to_string(),
                    more: ambiguous.has_more(),
                    listing: ambiguous.candidate_list(),
                    candidates: ambiguous.candidates,
                });
            }
            TableMatch::NotFound => {
                return Err(LookupError::NotFound {
                    reference: reference.to_string(),
                });
            }
        };

        let fields = resolve_fields(&table.rows, &request.fields, &self.config);
        let indexes = consolidate_indexes(
            &table.physical_table,
            &self.snapshot.indexes,
            &self.snapshot.index_columns,
        );

        tracing::debug!(
            table = %table.physical_table,
            fields = fields.len(),
            indexes = indexes.indexes.len(),
            "lookup resolved"
        );

        Ok(Lookup {
            request: request.clone(),
            pass: table.pass,
            context: ResolvedTableContext {
                physical_table: table.physical_table,
                logical_table: table.logical_table,
                indexes,
            },
            fields,
        })
    }
}

/// Session state machine
///
/// `Idle -> {Resolved, Ambiguous, NotFound}`. Every submission starts a new
/// resolution from whatever state the session is in; `reset` goes back to
/// `Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Resolved(Box<Lookup>),
    Failed {
        request: LookupRequest,
        error: LookupError,
    },
}

impl SessionState {
    /// Submit a new request, replacing the current state
    pub fn submit(self, engine: &LookupEngine, request: LookupRequest) -> SessionState {
        match engine.lookup(&request) {
            Ok(lookup) => SessionState::Resolved(Box::new(lookup)),
            Err(error) => SessionState::Failed { request, error },
        }
    }

    /// Navigate back: drop the active context
    pub fn reset(self) -> SessionState {
        SessionState::Idle
    }

    /// The active context, if a table is resolved
    pub fn context(&self) -> Option<&ResolvedTableContext> {
        match self {
            SessionState::Resolved(lookup) => Some(&lookup.context),
            _ => None,
        }
    }

    pub fn lookup(&self) -> Option<&Lookup> {
        match self {
            SessionState::Resolved(lookup) => Some(lookup),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LookupError> {
        match self {
            SessionState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }
}
