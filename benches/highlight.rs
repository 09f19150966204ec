//! Benchmarks for search match highlighting.
//!
//! These benchmarks measure the regex work done for every visible list row.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use regex::RegexBuilder;

fn bench_matcher_build(c: &mut Criterion) {
    c.bench_function("matcher_build_escaped_query", |b| {
        b.iter(|| {
            RegexBuilder::new(&regex::escape(black_box("payments-api")))
                .case_insensitive(true)
                .build()
        })
    });
}

fn bench_find_matches(c: &mut Criterion) {
    let re = RegexBuilder::new(&regex::escape("api"))
        .case_insensitive(true)
        .build()
        .unwrap();
    let rows: Vec<String> = (0..100)
        .map(|i| format!("Payments API gateway service {}", i))
        .collect();

    c.bench_function("find_matches_100_rows", |b| {
        b.iter(|| {
            for row in &rows {
                black_box(re.find_iter(black_box(row)).count());
            }
        })
    });
}

fn bench_lowercase_contains(c: &mut Criterion) {
    let text = "Payments API gateway";

    c.bench_function("lowercase_contains", |b| {
        b.iter(|| black_box(text).to_lowercase().contains("api"))
    });
}

criterion_group!(
    benches,
    bench_matcher_build,
    bench_find_matches,
    bench_lowercase_contains
);
criterion_main!(benches);
