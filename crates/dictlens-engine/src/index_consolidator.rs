//! Index and index-column consolidation for a resolved table
//!
//! Introspection returns every index visible to the connection, often with
//! the same index repeated per owner or grant. Consolidation selects the
//! table's rows, keeps a single owner and drops duplicates. Duplicate
//! detection works on normalized keys only.

use crate::owner_disambiguator::{filter_by_owner, pick_index_owner};
use dictlens_core::{
    normalize_identifier, qualify, IndexColumnEntry, IndexColumnRow, IndexEntry, IndexEntryReport,
    IndexRow, TableReference,
};
use std::collections::HashSet;

/// Join key between an index and its columns: `OWNER.NAME` when the index
/// owner is known, the bare normalized name otherwise
pub fn index_key<T: IndexEntry + ?Sized>(row: &T) -> String {
    qualify(row.index_owner(), row.index_name())
}

/// Drop repeated indexes, keeping the first occurrence of each
/// `(table, index key, uniqueness)`
pub fn dedupe_indexes(rows: Vec<IndexRow>) -> Vec<IndexRow> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| {
            seen.insert((
                normalize_identifier(&row.table_name),
                index_key(row),
                row.uniqueness.clone(),
            ))
        })
        .collect()
}

/// Drop repeated index columns, keeping the first occurrence of each
/// `(table, index key, column, position)`
pub fn dedupe_index_columns(rows: Vec<IndexColumnRow>) -> Vec<IndexColumnRow> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| {
            seen.insert((
                normalize_identifier(&row.table_name),
                index_key(row),
                normalize_identifier(&row.column_name),
                row.column_position.clone(),
            ))
        })
        .collect()
}

/// Columns of one index, ordered by position. Numeric positions come
/// first, then text positions, then rows without a position; equal
/// positions keep their delivered order.
pub fn group_columns_for_index(key: &str, columns: &[IndexColumnRow]) -> Vec<IndexColumnRow> {
    let mut grouped: Vec<IndexColumnRow> = columns
        .iter()
        .filter(|c| index_key(*c) == key)
        .cloned()
        .collect();

    grouped.sort_by(|a, b| {
        (a.column_position.is_none(), &a.column_position)
            .cmp(&(b.column_position.is_none(), &b.column_position))
    });
    grouped
}

/// An index with its columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGroup {
    pub key: String,
    pub index: IndexRow,
    pub columns: Vec<IndexColumnRow>,
}

/// Deduplicated, single-owner index data for one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidatedIndexes {
    /// Owner the data was narrowed to (empty when no filtering applied)
    pub owner: String,
    pub indexes: Vec<IndexRow>,
    pub columns: Vec<IndexColumnRow>,
}

impl ConsolidatedIndexes {
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Each index with its columns in position order
    pub fn groups(&self) -> Vec<IndexGroup> {
        self.indexes
            .iter()
            .map(|index| {
                let key = index_key(index);
                let columns = group_columns_for_index(&key, &self.columns);
                IndexGroup {
                    key,
                    index: index.clone(),
                    columns,
                }
            })
            .collect()
    }

    /// Report entries for every index
    pub fn to_report(&self) -> Vec<IndexEntryReport> {
        self.groups()
            .into_iter()
            .map(|group| IndexEntryReport {
                key: group.key,
                name: group.index.index_name,
                uniqueness: group.index.uniqueness,
                columns: group
                    .columns
                    .into_iter()
                    .map(|c| IndexColumnEntry {
                        name: c.column_name,
                        position: c.column_position,
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Select, disambiguate and deduplicate the index data of one table.
///
/// `table` is usually the resolved physical table name; an owner prefix is
/// honoured against the rows' table owner.
pub fn consolidate_indexes(
    table: &str,
    all_indexes: &[IndexRow],
    all_columns: &[IndexColumnRow],
) -> ConsolidatedIndexes {
    let reference = TableReference::parse(table);

    let indexes: Vec<IndexRow> = all_indexes
        .iter()
        .filter(|row| reference.matches(&row.table_owner, &row.table_name))
        .cloned()
        .collect();
    let columns: Vec<IndexColumnRow> = all_columns
        .iter()
        .filter(|row| reference.matches(&row.table_owner, &row.table_name))
        .cloned()
        .collect();

    let owner = pick_index_owner(&indexes, &columns);
    let indexes = dedupe_indexes(filter_by_owner(indexes, &owner));
    let columns = dedupe_index_columns(filter_by_owner(columns, &owner));

    tracing::debug!(
        table = %reference,
        owner = %owner,
        indexes = indexes.len(),
        columns = columns.len(),
        "consolidated indexes"
    );

    ConsolidatedIndexes {
        owner,
        indexes,
        columns,
    }
}
