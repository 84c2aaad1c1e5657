//! Criterion benchmarks for reference resolution.
//!
//! Collections are built outside the benchmark loop so only resolution is
//! measured, not parsing or table construction.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

use schemaref_core::{
    inline_resolve, prepare_text, resolve_all, resolve_to_definitions, IdentityConverter,
    ResolveOptions, SchemaTable,
};

fn load_fixture(name: &str) -> String {
    let fixtures_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");
    let path = Path::new(fixtures_dir).join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// `width` schemas, each referencing the next `fan_out` schemas (wrapping),
/// so every schema sits on many cycles.
fn ring_table(width: usize, fan_out: usize) -> SchemaTable {
    let mut schemas = Map::new();
    for i in 0..width {
        let mut props = Map::new();
        for k in 1..=fan_out {
            let target = (i + k) % width;
            props.insert(
                format!("p{k}"),
                json!({ "$ref": format!("#/components/schemas/S{target}") }),
            );
        }
        props.insert("label".to_string(), json!({ "type": "string", "maxLength": 64 }));
        schemas.insert(
            format!("S{i}"),
            json!({ "type": "object", "properties": Value::Object(props) }),
        );
    }
    SchemaTable::from_map(&schemas)
}

fn bench_resolve_ring(c: &mut Criterion) {
    let table = ring_table(200, 4);
    let root = table.find("S0").unwrap().clone();
    let options = ResolveOptions::default();

    c.bench_function("resolve/ring_200x4", |b| {
        b.iter(|| {
            resolve_to_definitions(black_box("S0"), black_box(&root), &table, &options)
        })
    });
}

fn bench_resolve_all_ring(c: &mut Criterion) {
    let table = ring_table(50, 3);
    let options = ResolveOptions::default();

    c.bench_function("resolve_all/ring_50x3", |b| {
        b.iter(|| resolve_all(black_box(&table), &options))
    });
}

fn bench_inline_ring(c: &mut Criterion) {
    let table = ring_table(200, 4);
    let root = table.find("S0").unwrap().clone();

    c.bench_function("inline/ring_200x4", |b| {
        b.iter(|| inline_resolve(black_box(&root), &table))
    });
}

fn bench_prepare_petstore(c: &mut Criterion) {
    let text = load_fixture("petstore.yaml");
    let options = ResolveOptions::default();

    c.bench_function("prepare/petstore", |b| {
        b.iter(|| prepare_text(black_box(&text), &IdentityConverter, &options).unwrap())
    });
}

criterion_group!(
    benches,
    bench_resolve_ring,
    bench_resolve_all_ring,
    bench_inline_ring,
    bench_prepare_petstore
);
criterion_main!(benches);
