//! Snapshot fixtures for catalog integration tests
//!
//! The JSON mirrors what the introspection call returns: numbers and nulls
//! mixed into text columns, positions delivered as strings.

/// A snapshot with one customers table and duplicated index data
pub const CUSTOMERS_SNAPSHOT: &str = r#"{
    "data": [
        {"PHYSICAL_TABLE": "CUSTOMERS", "PHYSICAL_FIELD": "ID", "LOGICAL_TABLE": "ANAGRAFICA_CLIENTI",
         "LOGICAL_FIELD": "CODICE", "DATA_TYPE": "N", "LENGTH": 10, "DECIMALS": 0},
        {"PHYSICAL_TABLE": "CUSTOMERS", "PHYSICAL_FIELD": "NAME", "LOGICAL_TABLE": "ANAGRAFICA_CLIENTI",
         "LOGICAL_FIELD": "RAGIONE_SOCIALE", "DATA_TYPE": "C", "LENGTH": 60, "DECIMALS": null}
    ],
    "indexes": [
        {"TABLE_OWNER": "APP", "TABLE_NAME": "CUSTOMERS", "INDEX_NAME": "PK_CUSTOMERS",
         "UNIQUENESS": "UNIQUE", "INDEX_OWNER": "APP"},
        {"TABLE_OWNER": "APP", "TABLE_NAME": "CUSTOMERS", "INDEX_NAME": "PK_CUSTOMERS",
         "UNIQUENESS": "UNIQUE", "INDEX_OWNER": "APP"},
        {"TABLE_OWNER": "LEGACY", "TABLE_NAME": "CUSTOMERS", "INDEX_NAME": "CUST_PK",
         "UNIQUENESS": "UNIQUE", "INDEX_OWNER": "LEGACY"}
    ],
    "index_columns": [
        {"TABLE_OWNER": "APP", "TABLE_NAME": "CUSTOMERS", "INDEX_OWNER": "APP",
         "INDEX_NAME": "PK_CUSTOMERS", "COLUMN_NAME": "ID", "COLUMN_POSITION": "1"},
        {"TABLE_OWNER": "LEGACY", "TABLE_NAME": "CUSTOMERS", "INDEX_OWNER": "LEGACY",
         "INDEX_NAME": "CUST_PK", "COLUMN_NAME": "CUST_ID", "COLUMN_POSITION": 1}
    ]
}"#;

/// Valid JSON that is not a snapshot
pub const WRONG_SHAPE: &str = r#"{"data": "not a list"}"#;

/// Positions delivered as floats and free text
pub const ODD_POSITIONS_SNAPSHOT: &str = r#"{
    "data": [
        {"PHYSICAL_TABLE": "ORDERS", "PHYSICAL_FIELD": "ID", "LOGICAL_TABLE": "ORDINI", "LOGICAL_FIELD": "NUMERO"},
        {"PHYSICAL_TABLE": "ARTICLES", "PHYSICAL_FIELD": "CODE", "LOGICAL_TABLE": "ARTICOLI", "LOGICAL_FIELD": "CODICE"}
    ],
    "indexes": [
        {"TABLE_OWNER": "APP", "TABLE_NAME": "ORDERS", "INDEX_NAME": "PK_ORDERS", "UNIQUENESS": "UNIQUE", "INDEX_OWNER": "APP"}
    ],
    "index_columns": [
        {"TABLE_OWNER": "APP", "TABLE_NAME": "ORDERS", "INDEX_OWNER": "APP", "INDEX_NAME": "PK_ORDERS",
         "COLUMN_NAME": "LINE", "COLUMN_POSITION": "A"},
        {"TABLE_OWNER": "APP", "TABLE_NAME": "ORDERS", "INDEX_OWNER": "APP", "INDEX_NAME": "PK_ORDERS",
         "COLUMN_NAME": "ID", "COLUMN_POSITION": 1.0},
        {"TABLE_OWNER": "APP", "TABLE_NAME": "ORDERS", "INDEX_OWNER": "APP", "INDEX_NAME": "PK_ORDERS",
         "COLUMN_NAME": "YEAR", "COLUMN_POSITION": "2.0"}
    ]
}"#;
