//! Benchmarks for table resolution and index consolidation
//!
//! Dictionaries of real ERP installations hold tens of thousands of rows
//! and every lookup scans them; these benchmarks track that cost.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dictlens_core::{CatalogSnapshot, DictionaryRow, IndexColumnRow, IndexRow};
use dictlens_engine::{consolidate_indexes, resolve_table, LookupEngine, LookupRequest};

/// Generate a snapshot with `tables` tables of 20 fields each, two indexes
/// per table and every index repeated under a second owner
fn generate_snapshot(tables: usize) -> CatalogSnapshot {
    let mut dictionary = Vec::with_capacity(tables * 20);
    let mut indexes = Vec::with_capacity(tables * 4);
    let mut columns = Vec::with_capacity(tables * 8);

    for t in 0..tables {
        let physical = format!("TAB_{:05}", t);
        let logical = format!("TABELLA_{:05}", t);

        for f in 0..20 {
            dictionary.push(
                DictionaryRow::new(&physical, format!("FIELD_{:02}", f), &logical, format!("CAMPO_{:02}", f))
                    .with_type("C", 20, 0),
            );
        }

        for owner in ["APP", "LEGACY"] {
            for (i, uniqueness) in ["UNIQUE", "NONUNIQUE"].iter().enumerate() {
                let index = format!("IX_{}_{}", physical, i);
                indexes.push(IndexRow::new(owner, &index, owner, &physical, *uniqueness));
                columns.push(IndexColumnRow::new(owner, &index, owner, &physical, "FIELD_00", Some(1)));
                columns.push(IndexColumnRow::new(owner, &index, owner, &physical, "FIELD_01", Some(2)));
            }
        }
    }

    CatalogSnapshot::new(dictionary, indexes, columns)
}

fn bench_resolve_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_table");

    for size in [100, 1_000, 5_000].iter() {
        let snapshot = generate_snapshot(*size);
        let exact = format!("TAB_{:05}", size / 2);

        group.bench_with_input(BenchmarkId::new("exact", size), &snapshot, |b, snapshot| {
            b.iter(|| black_box(resolve_table(&exact, &snapshot.dictionary, 10)));
        });

        group.bench_with_input(BenchmarkId::new("substring_ambiguous", size), &snapshot, |b, snapshot| {
            b.iter(|| black_box(resolve_table("TAB_0", &snapshot.dictionary, 10)));
        });
    }

    group.finish();
}

fn bench_consolidate_indexes(c: &mut Criterion) {
    let mut group = c.benchmark_group("consolidate_indexes");

    for size in [100, 1_000, 5_000].iter() {
        let snapshot = generate_snapshot(*size);
        let table = format!("TAB_{:05}", size / 2);

        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, snapshot| {
            b.iter(|| {
                black_box(consolidate_indexes(&table, &snapshot.indexes, &snapshot.index_columns))
            });
        });
    }

    group.finish();
}

fn bench_full_lookup(c: &mut Criterion) {
    let engine = LookupEngine::new(generate_snapshot(2_000));
    let request = LookupRequest::new("tabella_01000").with_fields("field_03, campo_07 ghost");

    c.bench_function("full_lookup_2000_tables", |b| {
        b.iter(|| black_box(engine.lookup(&request)));
    });
}

criterion_group!(benches, bench_resolve_table, bench_consolidate_indexes, bench_full_lookup);

criterion_main!(benches);
