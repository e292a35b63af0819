//! # Event Bus Publish Benchmarks
//!
//! | Scenario | Measures |
//! |----------|----------|
//! | sync fan-out | Inline dispatch cost per handler |
//! | typed args | Argument boxing and downcast per publish |
//! | unknown topic | Registry lookup miss |
//! | async dispatch | Spawn + drain through `wait_async` |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use event_bus::{Args, Bus, Callback};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Sync dispatch
// ============================================================================

fn bench_sync_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync-fanout");

    for handlers in [1usize, 10, 100] {
        let bus = Bus::new();
        let counter = Arc::new(AtomicU64::new(0));
        for _ in 0..handlers {
            let c = counter.clone();
            bus.subscribe(
                "bench",
                Callback::variadic(move |_: &Args| {
                    c.fetch_add(1, Ordering::Relaxed);
                }),
            )
            .expect("subscribe");
        }

        group.throughput(Throughput::Elements(handlers as u64));
        group.bench_with_input(BenchmarkId::new("publish", handlers), &handlers, |b, _| {
            b.iter(|| bus.publish(black_box("bench"), ()))
        });
    }

    group.finish();
}

fn bench_typed_args(c: &mut Criterion) {
    let mut group = c.benchmark_group("typed-args");
    let bus = Bus::new();
    let sum = Arc::new(AtomicU64::new(0));
    let s = sum.clone();
    bus.subscribe("transfer", move |from: String, to: String, amount: u64| {
        black_box((from, to));
        s.fetch_add(amount, Ordering::Relaxed);
    })
    .expect("subscribe");

    group.bench_function("three_args", |b| {
        b.iter(|| {
            bus.publish(
                "transfer",
                ("alice".to_string(), "bob".to_string(), black_box(10u64)),
            )
        })
    });

    group.bench_function("unknown_topic", |b| {
        b.iter(|| bus.publish(black_box("nobody"), (1u64,)))
    });

    group.finish();
}

// ============================================================================
// Async dispatch
// ============================================================================

fn bench_async_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("async-dispatch");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    for transactional in [false, true] {
        let bus = Bus::new();
        bus.subscribe_async(
            "bench",
            |n: u64| {
                black_box(n);
            },
            transactional,
        )
        .expect("subscribe");

        let label = if transactional { "transactional" } else { "parallel" };
        group.throughput(Throughput::Elements(100));
        group.bench_function(BenchmarkId::new("publish_100_and_wait", label), |b| {
            b.iter(|| {
                for i in 0..100u64 {
                    bus.publish("bench", (i,));
                }
                bus.wait_async();
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sync_fanout, bench_typed_args, bench_async_dispatch);
criterion_main!(benches);
