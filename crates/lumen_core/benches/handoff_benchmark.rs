//! # Handoff Benchmark
//!
//! Measures the per-frame cost the render thread pays for cross-thread work:
//! 1. Swap-draining N renderable handles
//! 2. Draining and running N queued tasks
//!
//! Target: the drain itself stays O(1) in the number of handles.

#![allow(missing_docs)]

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lumen_core::{RenderableQueue, TaskChannel};

fn bench_renderable_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("renderable_drain");

    for count in [100usize, 1_000, 10_000] {
        let queue: RenderableQueue<u64> = RenderableQueue::with_capacity(count);
        let mut working: Vec<Arc<u64>> = Vec::with_capacity(count);
        let handles: Vec<Arc<u64>> = (0..count as u64).map(Arc::new).collect();

        group.bench_with_input(BenchmarkId::new("enqueue_drain", count), &count, |b, _| {
            b.iter(|| {
                for handle in &handles {
                    queue.enqueue(Arc::clone(handle));
                }
                let drained = queue.drain_into(&mut working);
                black_box(drained);
                working.clear();
            });
        });
    }

    group.finish();
}

fn bench_task_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("task_drain");

    for count in [100usize, 1_000] {
        let channel = TaskChannel::new();

        group.bench_with_input(BenchmarkId::new("submit_run", count), &count, |b, &count| {
            b.iter(|| {
                let handles: Vec<_> = (0..count).map(|i| channel.submit(move || i * 2)).collect();
                black_box(channel.drain_and_run_all());
                for handle in handles {
                    black_box(handle.wait().ok());
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_renderable_drain, bench_task_drain);
criterion_main!(benches);
