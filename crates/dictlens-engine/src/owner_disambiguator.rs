//! Choosing one table owner when index data spans several schemas
//!
//! The same table name can exist under several owners, so the index rows
//! selected for a table may belong to unrelated tables. The owner with the
//! most index rows is trusted; ties go to the owner with more index-column
//! rows, then to the smaller owner name.

use dictlens_core::{normalize_identifier, IndexColumnRow, IndexEntry, IndexRow};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Row counts for one owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerTally {
    /// Normalized owner (may be empty)
    pub owner: String,
    pub indexes: usize,
    pub columns: usize,
}

impl OwnerTally {
    fn rank(&self, other: &Self) -> Ordering {
        other
            .indexes
            .cmp(&self.indexes)
            .then_with(|| other.columns.cmp(&self.columns))
            .then_with(|| self.owner.cmp(&other.owner))
    }
}

/// Tally index and index-column rows per normalized table owner, best first
pub fn tally_owners(indexes: &[IndexRow], columns: &[IndexColumnRow]) -> Vec<OwnerTally> {
    let mut stats: BTreeMap<String, (usize, usize)> = BTreeMap::new();

    for row in indexes {
        stats.entry(normalize_identifier(row.table_owner())).or_default().0 += 1;
    }

    for row in columns {
        stats.entry(normalize_identifier(row.table_owner())).or_default().1 += 1;
    }

    let mut tallies: Vec<OwnerTally> = stats
        .into_iter()
        .map(|(owner, (indexes, columns))| OwnerTally { owner, indexes, columns })
        .collect();

    tallies.sort_by(OwnerTally::rank);
    tallies
}

/// Pick the owner to trust; empty when there is no data or the only
/// owner seen is the empty one
pub fn pick_index_owner(indexes: &[IndexRow], columns: &[IndexColumnRow]) -> String {
    let tallies = tally_owners(indexes, columns);

    if tallies.len() > 1 {
        tracing::debug!(?tallies, "index data spans several owners");
    }

    tallies
        .into_iter()
        .next()
        .map(|t| t.owner)
        .unwrap_or_default()
}

/// Keep rows whose normalized table owner equals `owner`. An empty owner
/// disables filtering.
pub fn filter_by_owner<T>(rows: Vec<T>, owner: &str) -> Vec<T>
where
    T: IndexEntry,
{
    if owner.is_empty() {
        return rows;
    }

    rows.into_iter()
        .filter(|row| normalize_identifier(row.table_owner()) == owner)
        .collect()
}
