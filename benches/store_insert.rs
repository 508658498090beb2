// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for store mutations.
//!
//! Measures the performance of:
//! - Insertion into a store at its per-position cap (eviction path)
//! - Insertion spread across every position
//! - Snapshot reads

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use toast_store::notifications::{Position, Store, ToastOptions};

/// Benchmark insertion when every insert evicts the oldest notification.
fn bench_insert_at_cap(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_insert");

    let store = Store::default();
    store.set_max_notifications(Some(5));
    for i in 0..5 {
        store.info(format!("warmup {i}"));
    }

    group.bench_function("insert_with_eviction", |b| {
        b.iter(|| {
            black_box(store.info(black_box("toast")));
        });
    });

    group.finish();
}

/// Benchmark insertion across all anchors with a large cap.
fn bench_insert_all_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_insert");

    group.bench_function("insert_all_positions", |b| {
        b.iter(|| {
            let store = Store::default();
            store.set_max_notifications(Some(50));
            for position in Position::ALL {
                for _ in 0..8 {
                    store.info(ToastOptions::new("toast").position(position));
                }
            }
            black_box(store.snapshot());
        });
    });

    group.finish();
}

/// Benchmark lock-free snapshot reads.
fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_read");

    let store = Store::default();
    for i in 0..5 {
        store.info(format!("n{i}"));
    }

    group.bench_function("snapshot", |b| {
        b.iter(|| black_box(store.snapshot().len()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_at_cap,
    bench_insert_all_positions,
    bench_snapshot
);
criterion_main!(benches);
