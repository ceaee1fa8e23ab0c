//! Normalizer throughput benchmarks
//!
//! Measures how fast representative JSONPath expressions are turned into
//! node sequences, and how long comma unions scale.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pathnorm::normalize;
use std::hint::black_box;

/// Expressions covering every selector form
fn sample_expressions() -> &'static [(&'static str, &'static str)] {
    &[
        ("dotted", "$.store.book.author"),
        ("recursive", "$..book[*].author"),
        ("union", "$..book[*]['category',\"author\"]"),
        ("slice", "$..book[-1:]"),
        ("filter", "$.store.book[?(@path !== \"$['store']['book'][0]\")]"),
        ("subpath", "$.link[$.obj.library.books[0].references[*]].title"),
        ("function", "$.store..price.round()"),
    ]
}

fn benchmark_expressions(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for (name, expression) in sample_expressions() {
        group.throughput(Throughput::Bytes(expression.len() as u64));
        group.bench_with_input(BenchmarkId::new("expression", name), expression, |b, expression| {
            b.iter(|| normalize(black_box(expression)).expect("Failed to normalize"));
        });
    }
    group.finish();
}

/// Union subscripts with a growing number of entries
fn benchmark_union_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("union_width");
    for width in [10, 100, 1000] {
        let entries: Vec<String> = (0..width).map(|i| format!("'key{}'", i)).collect();
        let expression = format!("$.items[{}]", entries.join(","));

        group.throughput(Throughput::Elements(width as u64));
        group.bench_with_input(BenchmarkId::new("entries", width), &expression, |b, expression| {
            b.iter(|| normalize(black_box(expression)).expect("Failed to normalize"));
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_expressions, benchmark_union_width);
criterion_main!(benches);
