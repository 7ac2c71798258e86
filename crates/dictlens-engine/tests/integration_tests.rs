//! Integration tests for table, field and index resolution

mod fixtures;

use dictlens_core::{normalize_identifier, split_owner_and_name, LookupConfig, NoticeCode};
use dictlens_engine::{
    consolidate_indexes, export_indexes_as_text, pick_index_owner, resolve_fields, resolve_table,
    LookupEngine, LookupError, LookupRequest, SessionState, TableMatch,
};
use pretty_assertions::assert_eq;

fn resolved_physical(outcome: TableMatch) -> (String, usize) {
    match outcome {
        TableMatch::Resolved(table) => (table.physical_table, table.rows.len()),
        other => panic!("expected a resolved table, got {:?}", other),
    }
}

#[test]
fn normalization_properties() {
    for raw in ["", " hr.employees ", "Anagrafica Clienti", "\tx\ny\r", "ordini_storico"] {
        let normalized = normalize_identifier(raw);
        assert_eq!(normalize_identifier(&normalized), normalized);
        assert!(!normalized.chars().any(char::is_whitespace));
        assert_eq!(normalized.to_uppercase(), normalized);
    }

    assert_eq!(split_owner_and_name("hr.employees").owner, "HR");
    assert_eq!(split_owner_and_name("hr.employees").name, "EMPLOYEES");
    assert_eq!(split_owner_and_name("employees").owner, "");
    assert_eq!(split_owner_and_name("employees").name, "EMPLOYEES");
}

#[test]
fn physical_logical_and_partial_names_resolve_to_same_table() {
    let dictionary = fixtures::snapshot().dictionary;

    let by_physical = resolved_physical(resolve_table("customers", &dictionary, 10));
    let by_logical = resolved_physical(resolve_table("ANAGRAFICA_CLIENTI", &dictionary, 10));
    let by_substring = resolved_physical(resolve_table("custom", &dictionary, 10));

    assert_eq!(by_physical, ("CUSTOMERS".to_string(), 3));
    assert_eq!(by_logical, by_physical);
    assert_eq!(by_substring, by_physical);
}

#[test]
fn shared_substring_is_ambiguous() {
    let dictionary = fixtures::snapshot().dictionary;

    match resolve_table("order", &dictionary, 10) {
        TableMatch::Ambiguous(ambiguous) => {
            let physical: Vec<_> = ambiguous.candidates.iter().map(|c| c.physical.clone()).collect();
            assert_eq!(physical, vec!["ORDERS".to_string(), "ORDERS_ARCHIVE".to_string()]);
            assert!(!ambiguous.has_more());
        }
        other => panic!("expected ambiguity, got {:?}", other),
    }
}

#[test]
fn requested_fields_keep_order_and_flag_misses() {
    let rows = fixtures::customers_rows();
    let fields = resolve_fields(&rows, "id, ghost_field", &LookupConfig::default());

    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].row.physical_field, "ID");
    assert!(!fields[0].is_missing());
    assert!(fields[1].is_missing());
    assert_eq!(fields[1].row.physical_field, "ghost_field");
    assert_eq!(fields[1].row.logical_field, "NOT FOUND");
}

#[test]
fn owner_with_most_indexes_is_kept() {
    let (indexes, columns) = fixtures::multi_owner_indexes();

    assert_eq!(pick_index_owner(&indexes, &columns), "APP");

    let consolidated = consolidate_indexes("T", &indexes, &columns);
    assert_eq!(consolidated.indexes.len(), 3);
    assert_eq!(consolidated.columns.len(), 5);
    assert!(consolidated.indexes.iter().all(|i| i.table_owner != "LEGACY"));
    assert!(consolidated.columns.iter().all(|c| c.table_owner != "LEGACY"));
}

#[test]
fn tied_owners_break_on_name() {
    let (indexes, columns) = fixtures::multi_owner_indexes();
    let retag = |owner: &str| {
        let indexes: Vec<_> = indexes
            .iter()
            .filter(|i| i.table_owner == "LEGACY")
            .cloned()
            .map(|mut i| {
                i.table_owner = owner.to_string();
                i
            })
            .collect();
        let columns: Vec<_> = columns
            .iter()
            .filter(|c| c.table_owner == "LEGACY")
            .cloned()
            .map(|mut c| {
                c.table_owner = owner.to_string();
                c
            })
            .collect();
        (indexes, columns)
    };

    let (mut all_indexes, mut all_columns) = retag("ZULU");
    let (alpha_indexes, alpha_columns) = retag("ALPHA");
    all_indexes.extend(alpha_indexes);
    all_columns.extend(alpha_columns);

    for _ in 0..5 {
        assert_eq!(pick_index_owner(&all_indexes, &all_columns), "ALPHA");
    }
}

#[test]
fn duplicated_index_data_collapses() {
    let snapshot = fixtures::snapshot();
    let consolidated = consolidate_indexes("CUSTOMERS", &snapshot.indexes, &snapshot.index_columns);

    assert_eq!(consolidated.indexes.len(), 1);
    assert_eq!(consolidated.columns.len(), 1);

    let text = export_indexes_as_text("CUSTOMERS", &consolidated.indexes, &consolidated.columns).unwrap();
    assert_eq!(
        text,
        "INDEXES FOR TABLE: CUSTOMERS\n\nINDEX: PK_CUSTOMERS (UNIQUE)\nCOLUMNS:\n  1. ID\n\n"
    );
}

#[test]
fn full_lookup_through_engine() {
    let engine = LookupEngine::new(fixtures::snapshot());
    let lookup = engine
        .lookup(&LookupRequest::new("testata").with_fields("id"))
        .unwrap();

    assert_eq!(lookup.context.physical_table, "T");
    assert_eq!(lookup.context.logical_table, "TESTATA");
    assert_eq!(lookup.context.indexes.owner, "APP");

    let groups = lookup.context.indexes.groups();
    let pk = groups.iter().find(|g| g.key == "APP.PK_T").unwrap();
    let names: Vec<_> = pk.columns.iter().map(|c| c.column_name.as_str()).collect();
    assert_eq!(names, vec!["ID", "LINE"]);

    let text = lookup.fields_text();
    assert!(text.starts_with("PHYSICAL_TABLE\t"));
    assert!(text.contains("T\tID\tTESTATA\tID\tN\t10\t0\n"));
}

#[test]
fn session_recovers_after_failures() {
    let engine = LookupEngine::new(fixtures::snapshot());

    let state = SessionState::default().submit(&engine, LookupRequest::new("invoices"));
    assert_eq!(
        state.error().map(|e| e.to_notice().code),
        Some(NoticeCode::TableNotFound)
    );

    let state = state.submit(&engine, LookupRequest::new(""));
    assert_eq!(state.error(), Some(&LookupError::EmptyReference));

    let state = state.submit(&engine, LookupRequest::new("orders_archive"));
    let lookup = state.lookup().unwrap();
    assert_eq!(lookup.context.physical_table, "ORDERS_ARCHIVE");
    assert!(lookup.notices().iter().any(|n| n.code == NoticeCode::NoIndexes));
}
