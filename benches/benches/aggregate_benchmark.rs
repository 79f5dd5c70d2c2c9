//! Parsing and bucketing throughput.
//!
//! Run with: `cargo bench --package taifex-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use taifex_aggregate::aggregate;
use taifex_bench::{report_text, session_ticks};
use taifex_ingest::{TickParser, parse_report};

const SIZES: [usize; 3] = [10_000, 100_000, 1_000_000];

fn bucket_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("bucket");

    for size in SIZES {
        let ticks = session_ticks(size, 1);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ticks, |b, ticks| {
            b.iter(|| aggregate(black_box(ticks)).unwrap());
        });
    }

    group.finish();
}

fn parse_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let parser = TickParser::default();

    for size in &SIZES[..2] {
        let text = report_text(&session_ticks(*size, 1));
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), text.as_bytes(), |b, bytes| {
            b.iter(|| parse_report(&parser, black_box(bytes)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bucket_benchmark, parse_benchmark);
criterion_main!(benches);
