//! Dictionary and index records as delivered by the introspection source
//!
//! Rows are flat and denormalized. Nothing here is deduplicated or
//! normalized; that happens in the engine.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One physical field of one physical table, with its logical names
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DictionaryRow {
    /// Physical table name
    #[serde(default, deserialize_with = "lenient_text")]
    pub physical_table: String,

    /// Physical field name
    #[serde(default, deserialize_with = "lenient_text")]
    pub physical_field: String,

    /// Logical (business) table name
    #[serde(default, deserialize_with = "lenient_text")]
    pub logical_table: String,

    /// Logical (business) field name
    #[serde(default, deserialize_with = "lenient_text")]
    pub logical_field: String,

    /// Data type as declared in the dictionary
    #[serde(default, deserialize_with = "lenient_text")]
    pub data_type: String,

    /// Field width, verbatim (may be empty)
    #[serde(default, deserialize_with = "lenient_text")]
    pub length: String,

    /// Decimal digits, verbatim (may be empty)
    #[serde(default, deserialize_with = "lenient_text")]
    pub decimals: String,
}

impl DictionaryRow {
    /// Create a row with empty type metadata
    pub fn new(
        physical_table: impl Into<String>,
        physical_field: impl Into<String>,
        logical_table: impl Into<String>,
        logical_field: impl Into<String>,
    ) -> Self {
        Self {
            physical_table: physical_table.into(),
            physical_field: physical_field.into(),
            logical_table: logical_table.into(),
            logical_field: logical_field.into(),
            ..Self::default()
        }
    }

    /// Set type, length and decimals
    pub fn with_type(
        mut self,
        data_type: impl Into<String>,
        length: impl ToString,
        decimals: impl ToString,
    ) -> Self {
        self.data_type = data_type.into();
        self.length = length.to_string();
        self.decimals = decimals.to_string();
        self
    }

    /// The seven grid cells in display order
    pub fn cells(&self) -> [&str; 7] {
        [
            &self.physical_table,
            &self.physical_field,
            &self.logical_table,
            &self.logical_field,
            &self.data_type,
            &self.length,
            &self.decimals,
        ]
    }
}

/// Common accessors of index and index-column rows
pub trait IndexEntry {
    fn index_owner(&self) -> &str;
    fn index_name(&self) -> &str;
    fn table_owner(&self) -> &str;
    fn table_name(&self) -> &str;
}

/// An index on a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct IndexRow {
    /// Schema owning the index
    #[serde(default, deserialize_with = "lenient_text")]
    pub index_owner: String,

    /// Index name
    #[serde(default, deserialize_with = "lenient_text")]
    pub index_name: String,

    /// Schema owning the indexed table
    #[serde(default, deserialize_with = "lenient_text")]
    pub table_owner: String,

    /// Indexed table name
    #[serde(default, deserialize_with = "lenient_text")]
    pub table_name: String,

    /// `UNIQUE` / `NONUNIQUE`, verbatim
    #[serde(default, deserialize_with = "lenient_text")]
    pub uniqueness: String,
}

impl IndexRow {
    pub fn new(
        index_owner: impl Into<String>,
        index_name: impl Into<String>,
        table_owner: impl Into<String>,
        table_name: impl Into<String>,
        uniqueness: impl Into<String>,
    ) -> Self {
        Self {
            index_owner: index_owner.into(),
            index_name: index_name.into(),
            table_owner: table_owner.into(),
            table_name: table_name.into(),
            uniqueness: uniqueness.into(),
        }
    }
}

impl IndexEntry for IndexRow {
    fn index_owner(&self) -> &str {
        &self.index_owner
    }

    fn index_name(&self) -> &str {
        &self.index_name
    }

    fn table_owner(&self) -> &str {
        &self.table_owner
    }

    fn table_name(&self) -> &str {
        &self.table_name
    }
}

/// One column of an index
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct IndexColumnRow {
    #[serde(default, deserialize_with = "lenient_text")]
    pub index_owner: String,

    #[serde(default, deserialize_with = "lenient_text")]
    pub index_name: String,

    #[serde(default, deserialize_with = "lenient_text")]
    pub table_owner: String,

    #[serde(default, deserialize_with = "lenient_text")]
    pub table_name: String,

    #[serde(default, deserialize_with = "lenient_text")]
    pub column_name: String,

    /// 1-based position inside the index (absent when not delivered)
    #[serde(default, deserialize_with = "lenient_position")]
    pub column_position: Option<ColumnPosition>,
}

impl IndexColumnRow {
    pub fn new(
        index_owner: impl Into<String>,
        index_name: impl Into<String>,
        table_owner: impl Into<String>,
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        column_position: Option<u32>,
    ) -> Self {
        Self {
            index_owner: index_owner.into(),
            index_name: index_name.into(),
            table_owner: table_owner.into(),
            table_name: table_name.into(),
            column_name: column_name.into(),
            column_position: column_position.map(ColumnPosition::Number),
        }
    }

    /// Position as displayed (empty when absent)
    pub fn position_label(&self) -> String {
        self.column_position
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

/// Position of a column inside its index.
///
/// Numeric positions order numerically and come before anything the
/// source delivered as unparsable text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnPosition {
    Number(u32),
    Text(String),
}

impl fmt::Display for ColumnPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(text) => write!(f, "{}", text),
        }
    }
}

impl IndexEntry for IndexColumnRow {
    fn index_owner(&self) -> &str {
        &self.index_owner
    }

    fn index_name(&self) -> &str {
        &self.index_name
    }

    fn table_owner(&self) -> &str {
        &self.table_owner
    }

    fn table_name(&self) -> &str {
        &self.table_name
    }
}

/// Whether a requested field was found in the dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    Found,
    Missing,
}

/// A row of the field grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedField {
    #[serde(flatten)]
    pub row: DictionaryRow,

    pub status: FieldStatus,
}

impl ResolvedField {
    pub fn found(row: DictionaryRow) -> Self {
        Self {
            row,
            status: FieldStatus::Found,
        }
    }

    pub fn missing(row: DictionaryRow) -> Self {
        Self {
            row,
            status: FieldStatus::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.status == FieldStatus::Missing
    }
}

/// The three lists delivered by one introspection call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Field dictionary
    #[serde(default, rename = "data")]
    pub dictionary: Vec<DictionaryRow>,

    /// All indexes visible to the connection
    #[serde(default)]
    pub indexes: Vec<IndexRow>,

    /// All index columns visible to the connection
    #[serde(default)]
    pub index_columns: Vec<IndexColumnRow>,
}

impl CatalogSnapshot {
    pub fn new(
        dictionary: Vec<DictionaryRow>,
        indexes: Vec<IndexRow>,
        index_columns: Vec<IndexColumnRow>,
    ) -> Self {
        Self {
            dictionary,
            indexes,
            index_columns,
        }
    }

    /// Parse a snapshot from its JSON form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Row counts
    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            fields: self.dictionary.len(),
            indexes: self.indexes.len(),
            index_columns: self.index_columns.len(),
        }
    }
}

/// Row counts of a loaded snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub fields: usize,
    pub indexes: usize,
    pub index_columns: usize,
}

impl fmt::Display for SnapshotSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Loaded {} fields and {} indexes", self.fields, self.indexes)
    }
}

/// Strings may arrive as null or as bare numbers
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Positions may arrive as integers, floats, numeric strings, empty
/// strings or null. Values that are not a whole number are kept as text.
fn lenient_position<'de, D>(deserializer: D) -> Result<Option<ColumnPosition>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::Number(n) => Some(
            n.as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .or_else(|| n.as_f64().and_then(whole_position))
                .map(ColumnPosition::Number)
                .unwrap_or_else(|| ColumnPosition::Text(n.to_string())),
        ),
        serde_json::Value::String(s) if s.trim().is_empty() => None,
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            let number = trimmed
                .parse::<u32>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(whole_position));
            Some(match number {
                Some(n) => ColumnPosition::Number(n),
                None => ColumnPosition::Text(s),
            })
        }
        other => Some(ColumnPosition::Text(other.to_string())),
    })
}

fn whole_position(value: f64) -> Option<u32> {
    if value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value) {
        Some(value as u32)
    } else {
        None
    }
}
