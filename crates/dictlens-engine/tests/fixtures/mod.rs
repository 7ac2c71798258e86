//! Test fixtures for engine integration tests
//!
//! A small catalog resembling what an ERP dictionary returns: physical
//! tables with Italian logical names, indexes duplicated across owners and
//! grants, and index columns delivered out of order.

use dictlens_core::{CatalogSnapshot, DictionaryRow, IndexColumnRow, IndexRow};

/// Customer master data: three fields
pub fn customers_rows() -> Vec<DictionaryRow> {
    vec![
        DictionaryRow::new("CUSTOMERS", "ID", "ANAGRAFICA_CLIENTI", "CODICE").with_type("N", 10, 0),
        DictionaryRow::new("CUSTOMERS", "NAME", "ANAGRAFICA_CLIENTI", "RAGIONE_SOCIALE").with_type("C", 60, ""),
        DictionaryRow::new("CUSTOMERS", "VAT", "ANAGRAFICA_CLIENTI", "PARTITA_IVA").with_type("C", 16, ""),
    ]
}

/// Orders and their archive: two tables sharing the `ORDER` substring
pub fn orders_rows() -> Vec<DictionaryRow> {
    vec![
        DictionaryRow::new("ORDERS", "ID", "ORDINI", "NUMERO").with_type("N", 12, 0),
        DictionaryRow::new("ORDERS", "CUSTOMER_ID", "ORDINI", "CLIENTE").with_type("N", 10, 0),
        DictionaryRow::new("ORDERS_ARCHIVE", "ID", "ORDINI_STORICO", "NUMERO").with_type("N", 12, 0),
    ]
}

/// Index data for table `T`: owner APP has 3 indexes / 5 columns, owner
/// LEGACY has 1 index / 1 column
pub fn multi_owner_indexes() -> (Vec<IndexRow>, Vec<IndexColumnRow>) {
    let indexes = vec![
        IndexRow::new("APP", "PK_T", "APP", "T", "UNIQUE"),
        IndexRow::new("LEGACY", "PK_T", "LEGACY", "T", "UNIQUE"),
        IndexRow::new("APP", "IX_T_DATE", "APP", "T", "NONUNIQUE"),
        IndexRow::new("APP", "IX_T_CUST", "APP", "T", "NONUNIQUE"),
    ];

    let columns = vec![
        IndexColumnRow::new("APP", "PK_T", "APP", "T", "LINE", Some(2)),
        IndexColumnRow::new("APP", "PK_T", "APP", "T", "ID", Some(1)),
        IndexColumnRow::new("APP", "IX_T_DATE", "APP", "T", "CREATED_AT", Some(1)),
        IndexColumnRow::new("APP", "IX_T_CUST", "APP", "T", "CUSTOMER_ID", Some(1)),
        IndexColumnRow::new("APP", "IX_T_CUST", "APP", "T", "CREATED_AT", Some(2)),
        IndexColumnRow::new("LEGACY", "PK_T", "LEGACY", "T", "OLD_ID", Some(1)),
    ];

    (indexes, columns)
}

/// Full snapshot combining the fixtures above, with repeated index rows
pub fn snapshot() -> CatalogSnapshot {
    let mut dictionary = customers_rows();
    dictionary.extend(orders_rows());
    dictionary.push(DictionaryRow::new("T", "ID", "TESTATA", "ID").with_type("N", 10, 0));

    let (mut indexes, mut columns) = multi_owner_indexes();
    indexes.push(IndexRow::new("APP", "PK_CUSTOMERS", "APP", "CUSTOMERS", "UNIQUE"));
    indexes.push(IndexRow::new("app", "pk_customers", "APP", "customers", "UNIQUE"));
    columns.push(IndexColumnRow::new("APP", "PK_CUSTOMERS", "APP", "CUSTOMERS", "ID", Some(1)));
    columns.push(IndexColumnRow::new("APP", "PK_CUSTOMERS", "APP", "CUSTOMERS", " id", Some(1)));

    CatalogSnapshot::new(dictionary, indexes, columns)
}
