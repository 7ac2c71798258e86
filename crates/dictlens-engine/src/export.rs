//! Plain-text exports of the field and index grids

use crate::index_consolidator::group_columns_for_index;
use crate::index_consolidator::index_key;
use dictlens_core::{IndexColumnRow, IndexRow, ResolvedField};

/// Header line of the field export
pub const FIELD_HEADER: [&str; 7] = [
    "PHYSICAL_TABLE",
    "PHYSICAL_FIELD",
    "LOGICAL_TABLE",
    "LOGICAL_FIELD",
    "TYPE",
    "LENGTH",
    "DECIMALS",
];

/// Export errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("No indexes to export for table {0}")]
    NothingToExport(String),
}

/// Tab-separated field grid with a header line. Missing fields are
/// exported verbatim with their placeholders.
pub fn export_fields_as_text(rows: &[ResolvedField]) -> String {
    let mut text = FIELD_HEADER.join("\t");
    text.push('\n');

    for field in rows {
        text.push_str(&field.row.cells().join("\t"));
        text.push('\n');
    }

    text
}

/// Index block: one section per index, columns in position order
pub fn export_indexes_as_text(
    table: &str,
    indexes: &[IndexRow],
    columns: &[IndexColumnRow],
) -> Result<String, ExportError> {
    if indexes.is_empty() {
        return Err(ExportError::NothingToExport(table.to_string()));
    }

    let mut text = format!("INDEXES FOR TABLE: {}\n\n", table);

    for index in indexes {
        text.push_str(&format!("INDEX: {} ({})\n", index.index_name, index.uniqueness));

        let grouped = group_columns_for_index(&index_key(index), columns);
        if !grouped.is_empty() {
            text.push_str("COLUMNS:\n");
            for column in &grouped {
                text.push_str(&format!("  {}. {}\n", column.position_label(), column.column_name));
            }
        }

        text.push('\n');
    }

    Ok(text)
}
