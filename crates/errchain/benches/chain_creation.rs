// Chain creation and inspection benchmarks
// Run with: cargo bench -p errchain

use criterion::{Criterion, criterion_group, criterion_main};
use errchain::{ChainError, dev_message, message, with_dev_message, with_message, with_stack};
use std::hint::black_box;

fn base() -> ChainError {
    ChainError::foreign(std::io::Error::other("connection reset"))
}

/// Wrapping an existing chain with a developer note (no capture)
fn bench_dev_message_wrap(c: &mut Criterion) {
    let base = with_stack(Some(base()));
    c.bench_function("with_dev_message", |b| {
        b.iter(|| {
            let err = with_dev_message(Some(black_box(base.clone())), [black_box("retrying")]);
            black_box(err);
        });
    });
}

/// Wrapping an existing chain with a user message (no capture)
fn bench_message_wrap(c: &mut Criterion) {
    let base = with_stack(Some(base()));
    c.bench_function("with_message", |b| {
        b.iter(|| {
            let err = with_message(Some(black_box(base.clone())), [black_box("try again")]);
            black_box(err);
        });
    });
}

/// Capturing and resolving the stack
fn bench_stack_wrap(c: &mut Criterion) {
    c.bench_function("with_stack", |b| {
        b.iter(|| {
            let err = with_stack(Some(black_box(base())));
            black_box(err);
        });
    });
}

/// Aggregating over a ten-link chain
fn bench_inspection(c: &mut Criterion) {
    let mut err = with_stack(Some(base()));
    for i in 0..5 {
        err = with_message(Some(err), [format!("step {i}")]);
        err = with_dev_message(Some(err), [format!("note {i}")]);
    }

    c.bench_function("message_and_dev_message", |b| {
        b.iter(|| {
            black_box(message::<&str>(black_box(&err), &[]));
            black_box(dev_message(black_box(&err)));
        });
    });

    c.bench_function("display", |b| {
        b.iter(|| black_box(black_box(&err).to_string()));
    });
}

criterion_group!(
    benches,
    bench_dev_message_wrap,
    bench_message_wrap,
    bench_stack_wrap,
    bench_inspection,
);

criterion_main!(benches);
