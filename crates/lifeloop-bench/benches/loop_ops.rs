//! Criterion benchmarks for the simulation loop and rule parsing.

use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lifeloop_bench::{reference_config, reference_engine};
use lifeloop_core::InputEvent;
use lifeloop_engine::SimulationLoop;
use lifeloop_rule::parse_rule;
use lifeloop_test_utils::RecordingPresenter;

fn bench_iterate_running(c: &mut Criterion) {
    let config = reference_config();
    let (tx, rx) = crossbeam_channel::bounded(config.input_queue_capacity);
    let mut now = Instant::now();
    let mut sim = SimulationLoop::new(
        reference_engine(42),
        RecordingPresenter::new(),
        config.clock(now),
        rx,
        config.ring_buffer_size,
    );
    tx.send(InputEvent::TogglePause).unwrap();
    sim.iterate(now);

    // Every iteration is 1 ms later: one step, a redraw every 16th.
    c.bench_function("iterate_running_64k", |b| {
        b.iter(|| {
            now += Duration::from_millis(1);
            black_box(sim.iterate(now));
        });
    });
}

fn bench_iterate_paused(c: &mut Criterion) {
    let config = reference_config();
    let (_tx, rx) = crossbeam_channel::bounded(config.input_queue_capacity);
    let mut now = Instant::now();
    let mut sim = SimulationLoop::new(
        reference_engine(42),
        RecordingPresenter::new(),
        config.clock(now),
        rx,
        config.ring_buffer_size,
    );

    c.bench_function("iterate_paused_idle", |b| {
        b.iter(|| {
            now += Duration::from_millis(1);
            black_box(sim.iterate(now));
        });
    });
}

fn bench_parse_rule(c: &mut Criterion) {
    c.bench_function("parse_rule", |b| {
        b.iter(|| {
            black_box(parse_rule(black_box("B36/S23")).unwrap());
            black_box(parse_rule(black_box("B2/S345/C4")).unwrap());
            black_box(parse_rule(black_box("brians_brain")).unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_iterate_running,
    bench_iterate_paused,
    bench_parse_rule
);
criterion_main!(benches);
