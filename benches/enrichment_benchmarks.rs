//! Performance benchmarks for the Premium Leave Engine.
//!
//! This benchmark suite covers the hot paths of a batch run:
//! - Date normalization across the supported text shapes
//! - Single servant aggregation with recorded windows
//! - Batches of 100 and 1000 servants through the parallel engine
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use premium_leave_engine::PremiumLeaveEngine;
use premium_leave_engine::enrichment::DateNormalizer;
use premium_leave_engine::models::{RawRecord, RawServant, RawValue};

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn create_engine() -> PremiumLeaveEngine {
    PremiumLeaveEngine::from_config_file("./config/premium_leave.yaml")
        .expect("Failed to load config")
}

/// Creates a servant with a mix of recorded-window and bare events.
fn create_servant(index: usize) -> RawServant {
    let events = (0..6)
        .map(|i| {
            let year = 2016 + i;
            let mut record = RawRecord::new()
                .with("INICIO", format!("{:02}/0{}/{}", 1 + index % 28, 1 + i % 9, year))
                .with("DIAS", 30)
                .with("RESTANDO", "15 (DIAS)");
            if i % 2 == 0 {
                let cycle = 2015 + (i / 5) * 5;
                record.insert("AQUISITIVO INICIO", format!("01/01/{}", cycle));
                record.insert("AQUISITIVO FIM", format!("31/12/{}", cycle + 4));
            }
            record
        })
        .collect();

    RawServant::new(
        RawRecord::new()
            .with("MATRICULA", format!("{:06}", index))
            .with("NOME", format!("Servidor {}", index))
            .with("UNIDADE", "Secretaria"),
        events,
    )
}

/// Benchmark: date normalization over the common input shapes.
fn bench_date_normalization(c: &mut Criterion) {
    let normalizer = DateNormalizer::new();
    let inputs: Vec<RawValue> = [
        "15/03/2025",
        "2025-03-15 14:30:00",
        "03/2025",
        "março de 2025",
        "March 15, 2025",
        "not a date",
    ]
    .into_iter()
    .map(RawValue::from)
    .collect();

    c.bench_function("date_normalization", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(normalizer.normalize(black_box(input)));
            }
        })
    });
}

/// Benchmark: one servant through the full pipeline.
fn bench_single_servant(c: &mut Criterion) {
    let engine = create_engine();
    let servants = vec![create_servant(1)];

    c.bench_function("single_servant", |b| {
        b.iter(|| black_box(engine.enrich(black_box(&servants), reference_date())))
    });
}

/// Benchmark: batches of servants through the parallel engine.
fn bench_batches(c: &mut Criterion) {
    let engine = create_engine();
    let mut group = c.benchmark_group("batch_processing");

    for size in [100usize, 1000] {
        let servants: Vec<RawServant> = (0..size).map(create_servant).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("batch", size), &servants, |b, servants| {
            b.iter(|| black_box(engine.enrich(servants, reference_date())))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_date_normalization,
    bench_single_servant,
    bench_batches
);
criterion_main!(benches);
