//! Field lookup inside a resolved table

use dictlens_core::{DictionaryRow, LookupConfig, ResolvedField};
use regex::Regex;
use std::sync::OnceLock;

fn separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"[\s,]+").expect("valid separator pattern"))
}

/// Split a free-text field list on whitespace and commas, dropping blanks
pub fn parse_field_list(raw: &str) -> Vec<String> {
    separator()
        .split(raw.trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the field grid for a resolved table.
///
/// With no requested fields every row of the table is returned in
/// delivered order. Otherwise there is exactly one entry per requested
/// field, in request order: the first row whose physical or logical field
/// equals the token (ignoring case), or a synthetic missing row.
pub fn resolve_fields(rows: &[DictionaryRow], raw_fields: &str, config: &LookupConfig) -> Vec<ResolvedField> {
    let requested = parse_field_list(raw_fields);

    if requested.is_empty() {
        return rows.iter().cloned().map(ResolvedField::found).collect();
    }

    requested
        .iter()
        .map(|field| match find_field(rows, field) {
            Some(row) => ResolvedField::found(row.clone()),
            None => {
                tracing::debug!(field = %field, "field not in table");
                ResolvedField::missing(missing_row(rows, field, config))
            }
        })
        .collect()
}

/// First row whose physical or logical field equals `field`, ignoring case
fn find_field<'a>(rows: &'a [DictionaryRow], field: &str) -> Option<&'a DictionaryRow> {
    let wanted = field.to_uppercase();
    rows.iter().find(|row| {
        row.physical_field.to_uppercase() == wanted || row.logical_field.to_uppercase() == wanted
    })
}

fn missing_row(rows: &[DictionaryRow], field: &str, config: &LookupConfig) -> DictionaryRow {
    let (physical_table, logical_table) = rows
        .first()
        .map(|r| (r.physical_table.clone(), r.logical_table.clone()))
        .unwrap_or_default();
    let placeholder = &config.missing_value_placeholder;

    DictionaryRow {
        physical_table,
        physical_field: field.to_string(),
        logical_table,
        logical_field: config.missing_field_marker.clone(),
        data_type: placeholder.clone(),
        length: placeholder.clone(),
        decimals: placeholder.clone(),
    }
}
