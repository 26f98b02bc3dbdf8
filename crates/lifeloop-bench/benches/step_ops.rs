//! Criterion benchmarks for grid stepping, snapshots and staged edits.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lifeloop_bench::{brain_engine, reference_engine, stress_engine};
use lifeloop_core::PixelPoint;

fn bench_step_64k(c: &mut Criterion) {
    let mut engine = reference_engine(42);
    engine.step();

    c.bench_function("step_64k", |b| {
        b.iter(|| black_box(engine.step()));
    });
}

fn bench_step_1m(c: &mut Criterion) {
    let mut engine = stress_engine(42);
    engine.step();

    c.bench_function("step_1m", |b| {
        b.iter(|| black_box(engine.step()));
    });
}

fn bench_step_brain_64k(c: &mut Criterion) {
    let mut engine = brain_engine(42);
    engine.step();

    c.bench_function("step_brain_64k", |b| {
        b.iter(|| black_box(engine.step()));
    });
}

fn bench_snapshot_64k(c: &mut Criterion) {
    let engine = reference_engine(42);

    c.bench_function("snapshot_64k", |b| {
        b.iter(|| black_box(engine.draw_snapshot()));
    });
}

fn bench_select_and_flush(c: &mut Criterion) {
    let mut engine = reference_engine(42);

    // 256 distinct cells down the diagonal, then commit.
    c.bench_function("select_256_and_flush", |b| {
        b.iter(|| {
            for i in 0..256 {
                engine.select_entity(PixelPoint::new(i, i));
            }
            black_box(engine.update_marked_entities());
        });
    });
}

criterion_group!(
    benches,
    bench_step_64k,
    bench_step_1m,
    bench_step_brain_64k,
    bench_snapshot_64k,
    bench_select_and_flush
);
criterion_main!(benches);
