//! Validator performance benchmarks.
//!
//! Measures single-feature checks, collection filtering and full store imports.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use geopin::{MemoryPersistence, Store, StoreConfig, validate_collection, validate_feature};
use serde_json::{Value, json};

/// Sample candidates, roughly one in three invalid.
fn sample_features() -> Vec<Value> {
    vec![
        json!({"type": "Feature", "geometry": {"type": "Point", "coordinates": [-70.6483, -33.4372]},
               "properties": {"name": "Plaza de Armas", "category": "landmark"}}),
        json!({"type": "Feature", "geometry": {"type": "Point", "coordinates": [2.2945, 48.8584]},
               "properties": {"name": "Tour Eiffel", "category": "landmark", "height_m": 330}}),
        json!({"type": "Feature", "geometry": {"type": "Point", "coordinates": [200.0, 10.0]},
               "properties": {"name": "Off the map", "category": "other"}}),
        json!({"type": "Feature", "geometry": {"type": "Point", "coordinates": [139.7005, 35.6595]},
               "properties": {"name": "", "category": "shopping"}}),
        json!({"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]},
               "properties": {"name": "Trail", "category": "park"}}),
        json!({"type": "Feature", "geometry": {"type": "Point", "coordinates": [-0.1276, 51.5072]},
               "properties": {"name": "Trafalgar Square", "category": "landmark"}}),
    ]
}

fn collection(size: usize) -> Value {
    let samples = sample_features();
    let features: Vec<Value> = samples.iter().cycle().take(size).cloned().collect();
    json!({"type": "FeatureCollection", "features": features})
}

/// Benchmark single-feature validation.
fn bench_feature_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("feature_validation");
    let samples = sample_features();

    group.bench_function("valid", |b| {
        b.iter(|| black_box(validate_feature(&samples[0])))
    });

    group.bench_function("invalid", |b| {
        b.iter(|| black_box(validate_feature(&samples[3])))
    });

    group.bench_function("batch_6", |b| {
        b.iter(|| {
            for sample in &samples {
                black_box(validate_feature(sample));
            }
        })
    });

    group.finish();
}

/// Benchmark collection filtering and import with growing input.
fn bench_collection_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_scaling");

    for size in [10, 100, 1_000, 10_000].iter() {
        let document = collection(*size);
        let text = document.to_string();

        group.bench_with_input(BenchmarkId::new("validate", size), &document, |b, document| {
            b.iter(|| black_box(validate_collection(document)))
        });

        group.bench_with_input(BenchmarkId::new("import_text", size), &text, |b, text| {
            let mut store = Store::open(MemoryPersistence::new(), StoreConfig::default());
            b.iter(|| black_box(store.import_text(text)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_feature_validation, bench_collection_scaling);

criterion_main!(benches);
