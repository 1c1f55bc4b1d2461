//! Benchmarks for broadcaster dispatch.
//!
//! Run with: cargo bench -p stepwire-signal

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::cell::Cell;
use std::hint::black_box;
use std::rc::Rc;

use stepwire_signal::Broadcaster;

// ============================================================================
// Changed-sample dispatch
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadcaster/dispatch");

    for subscribers in [1usize, 8, 64] {
        let b = Broadcaster::new(0_u64);
        let sink = Rc::new(Cell::new(0_u64));
        for _ in 0..subscribers {
            let sink = Rc::clone(&sink);
            b.subscribe(move |v| sink.set(sink.get().wrapping_add(*v)));
        }

        let mut next = 0_u64;
        group.bench_with_input(
            BenchmarkId::new("changed", subscribers),
            &(),
            |bench, _| {
                bench.iter(|| {
                    next = next.wrapping_add(1);
                    b.advance_step();
                    b.sample(black_box(next));
                })
            },
        );
    }

    group.finish();
}

// ============================================================================
// Unchanged-sample fast path
// ============================================================================

fn bench_unchanged(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadcaster/unchanged");

    let b = Broadcaster::new(42_u64);
    for _ in 0..64 {
        b.subscribe(|v| {
            black_box(v);
        });
    }

    group.bench_function("noop", |bench| {
        bench.iter(|| {
            b.advance_step();
            b.sample(black_box(42));
        })
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_unchanged);
criterion_main!(benches);
