//! Criterion benchmarks for the Naive Bayes scoring hot path in `nb-core`.
//!
//! Inputs are synthetic and deterministic so the benchmarks run the same
//! way in CI and on developer machines.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nb_core::inference::predict;
use nb_core::record::InputRecord;
use nb_model::Model;

/// Build a model with `n_attrs` attributes of `n_values` values each over
/// four classes, with likelihood mass tilted per class.
fn synthetic_model(n_attrs: usize, n_values: usize) -> Model {
    let classes = ["alpha", "beta", "gamma", "delta"];
    let mut doc = serde_json::json!({
        "classes": classes,
        "classPriors": {"alpha": 0.4, "beta": 0.3, "gamma": 0.2, "delta": 0.1},
        "epsilon": 1e-9,
        "attributes": [],
    });
    for a in 0..n_attrs {
        let values: Vec<String> = (0..n_values).map(|v| format!("v{v}")).collect();
        let mut cond_probs = serde_json::Map::new();
        for (c, class) in classes.iter().enumerate() {
            let row: Vec<f64> = (0..n_values)
                .map(|v| {
                    let weight = 1.0 + ((a + v + c) % n_values) as f64;
                    weight / ((n_values * (n_values + 1)) / 2) as f64
                })
                .collect();
            cond_probs.insert((*class).to_string(), serde_json::json!(row));
        }
        doc["attributes"].as_array_mut().expect("array").push(serde_json::json!({
            "name": format!("attr{a}"),
            "values": values,
            "condProbs": cond_probs,
        }));
    }
    Model::from_json_str(&doc.to_string()).expect("synthetic model parses")
}

fn record_for(model: &Model, offset: usize) -> InputRecord {
    let mut record = InputRecord::new();
    for (i, attr) in model.attributes.iter().enumerate() {
        let value = &attr.values[(i + offset) % attr.values.len()];
        record.set(&attr.name, value.clone());
    }
    record
}

fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");

    for (name, n_attrs, n_values) in [("small_4x3", 4usize, 3usize), ("wide_32x8", 32, 8)] {
        let model = synthetic_model(n_attrs, n_values);
        let record = record_for(&model, 0);
        group.bench_with_input(
            BenchmarkId::new("predict", name),
            &(model, record),
            |b, (model, record)| {
                b.iter(|| {
                    let prediction = predict(black_box(model), black_box(record));
                    black_box(prediction.best_class);
                })
            },
        );
    }

    // A coarse macro benchmark: 10k records with varied (and partially
    // unknown) values, approximating batch scoring throughput.
    let model = synthetic_model(8, 4);
    let mut records = Vec::with_capacity(10_000);
    for i in 0..10_000usize {
        let mut record = record_for(&model, i);
        if i % 7 == 0 {
            record.set("attr0", "unseen-value");
        }
        records.push(record);
    }

    group.bench_function("predict_10k", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for record in &records {
                let prediction = predict(black_box(&model), black_box(record));
                if prediction.best_class.as_deref() == Some("alpha") {
                    hits += 1;
                }
            }
            black_box(hits);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_predict);
criterion_main!(benches);
