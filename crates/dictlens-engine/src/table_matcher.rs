//! Table reference resolution against the field dictionary
//!
//! A reference resolves in two passes. The exact pass compares the
//! normalized physical and logical table names; only when it finds nothing
//! does the substring pass run. Whichever pass matched is then grouped by
//! physical table: one table resolves, several are ambiguous.

use dictlens_core::{normalize_identifier, DictionaryRow, TableReference};
use serde::Serialize;
use std::fmt;

/// Which pass produced the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPass {
    Exact,
    Substring,
}

/// A physical table offered to the user when a reference is ambiguous
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCandidate {
    pub physical: String,
    pub logical: String,
}

impl fmt::Display for TableCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.physical, self.logical)
    }
}

/// A reference that resolved to exactly one physical table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTable {
    /// The reference as parsed
    pub reference: TableReference,

    /// Physical table name, as delivered
    pub physical_table: String,

    /// Logical table name of the table's first row
    pub logical_table: String,

    /// Every dictionary row of the physical table, delivered order
    pub rows: Vec<DictionaryRow>,

    pub pass: MatchPass,
}

/// A reference that matched several physical tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousMatch {
    pub reference: TableReference,

    /// First candidates in first-seen order
    pub candidates: Vec<TableCandidate>,

    /// Number of distinct physical tables that matched
    pub total: usize,

    pub pass: MatchPass,
}

impl AmbiguousMatch {
    /// True when more tables matched than are listed
    pub fn has_more(&self) -> bool {
        self.total > self.candidates.len()
    }

    /// `P1 - L1, P2 - L2...` as shown to the user
    pub fn candidate_list(&self) -> String {
        let list = self
            .candidates
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        if self.has_more() {
            format!("{}...", list)
        } else {
            list
        }
    }
}

/// Outcome of resolving a table reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableMatch {
    Resolved(ResolvedTable),
    Ambiguous(AmbiguousMatch),
    NotFound,
}

/// Resolve a raw table reference against the dictionary.
///
/// An owner prefix in `raw` is parsed but not enforced: dictionary rows
/// carry no owner. `candidate_limit` caps the candidates listed for an
/// ambiguous match.
pub fn resolve_table(raw: &str, dictionary: &[DictionaryRow], candidate_limit: usize) -> TableMatch {
    let reference = TableReference::parse(raw);
    if reference.is_empty() {
        return TableMatch::NotFound;
    }

    let name = reference.name.as_str();

    let (pass, matches) = {
        let exact = matching_rows(dictionary, |table| table == name);
        if exact.is_empty() {
            (MatchPass::Substring, matching_rows(dictionary, |table| table.contains(name)))
        } else {
            (MatchPass::Exact, exact)
        }
    };

    tracing::debug!(reference = %reference, ?pass, rows = matches.len(), "table match pass");

    let tables = distinct_tables(&matches);

    match tables.len() {
        0 => TableMatch::NotFound,
        1 => {
            let physical = tables[0].physical.clone();
            let rows: Vec<DictionaryRow> = dictionary
                .iter()
                .filter(|r| r.physical_table == physical)
                .cloned()
                .collect();
            let logical_table = rows
                .first()
                .map(|r| r.logical_table.clone())
                .unwrap_or_default();

            TableMatch::Resolved(ResolvedTable {
                reference,
                physical_table: physical,
                logical_table,
                rows,
                pass,
            })
        }
        total => TableMatch::Ambiguous(AmbiguousMatch {
            reference,
            candidates: tables.into_iter().take(candidate_limit).collect(),
            total,
            pass,
        }),
    }
}

/// Rows whose normalized physical or logical table satisfies `predicate`
fn matching_rows<'a, F>(dictionary: &'a [DictionaryRow], predicate: F) -> Vec<&'a DictionaryRow>
where
    F: Fn(&str) -> bool,
{
    dictionary
        .iter()
        .filter(|row| {
            predicate(&normalize_identifier(&row.physical_table))
                || predicate(&normalize_identifier(&row.logical_table))
        })
        .collect()
}

/// Distinct physical tables in first-seen order, each with its first logical name
fn distinct_tables(rows: &[&DictionaryRow]) -> Vec<TableCandidate> {
    let mut tables: Vec<TableCandidate> = Vec::new();

    for row in rows {
        if !tables.iter().any(|t| t.physical == row.physical_table) {
            tables.push(TableCandidate {
                physical: row.physical_table.clone(),
                logical: row.logical_table.clone(),
            });
        }
    }

    tables
}
