//! Benchmarks for content selection.

use concept_animator::library::{classify, title_hash, ContentSelector};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn selection_benchmark(c: &mut Criterion) {
    let selector = ContentSelector::standard().expect("standard library is valid");

    c.bench_function("title_hash", |b| {
        b.iter(|| title_hash(black_box("Introduction to Photosynthesis")))
    });

    c.bench_function("classify", |b| {
        b.iter(|| classify(black_box("Learn Python Programming with web apps")))
    });

    c.bench_function("select", |b| {
        b.iter(|| {
            selector.select(
                black_box("World War II"),
                black_box(Some("causes and consequences")),
                black_box("high"),
            )
        })
    });
}

criterion_group!(benches, selection_benchmark);
criterion_main!(benches);
