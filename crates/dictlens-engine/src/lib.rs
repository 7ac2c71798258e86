//! dictlens engine - identifier resolution and index consolidation
//!
//! This crate implements the lookup logic over a materialized catalog
//! snapshot:
//! - Table matching (exact, then substring) with ambiguity reporting
//! - Field resolution with explicit not-found rows
//! - Owner disambiguation for multi-schema index data
//! - Index and index-column deduplication and grouping
//! - Plain-text exports
//!
//! Everything here is synchronous and pure; no function touches I/O.

pub mod table_matcher;
pub mod field_resolver;
pub mod owner_disambiguator;
pub mod index_consolidator;
pub mod export;
pub mod session;

pub use table_matcher::{resolve_table, AmbiguousMatch, MatchPass, ResolvedTable, TableCandidate, TableMatch};
pub use field_resolver::{parse_field_list, resolve_fields};
pub use owner_disambiguator::{filter_by_owner, pick_index_owner, tally_owners, OwnerTally};
pub use index_consolidator::{
    consolidate_indexes, dedupe_index_columns, dedupe_indexes, group_columns_for_index, index_key,
    ConsolidatedIndexes, IndexGroup,
};
pub use export::{export_fields_as_text, export_indexes_as_text, ExportError, FIELD_HEADER};
pub use session::{Lookup, LookupEngine, LookupError, LookupRequest, ResolvedTableContext, SessionState};
