//! Parse and encode throughput.
//!
//! Documents are generated in-process so the numbers do not depend on
//! fixture files: a flat record array, a deeply nested tree, a string-heavy
//! array that exercises escaping, and a single object with many keys.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jsonkit_core::{encode, parse, parse_with, ParseOptions, SerdeJsonFactory};

fn records(count: usize) -> String {
    let items: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"id":{i},"name":"user-{i}","score":{}.5,"active":{},"tags":["a","b"]}}"#,
                i % 100,
                i % 2 == 0
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

fn nested(depth: usize) -> String {
    let mut text = String::from("1");
    for i in 0..depth {
        text = if i % 2 == 0 {
            format!("[{text},null]")
        } else {
            format!(r#"{{"k":{text}}}"#)
        };
    }
    format!("[{text}]")
}

fn escaped_strings(count: usize) -> String {
    let items: Vec<&str> = (0..count)
        .map(|_| r#""line\none \"quoted\" path\/to\\file é""#)
        .collect();
    format!("[{}]", items.join(","))
}

fn wide_object(keys: usize) -> String {
    let entries: Vec<String> = (0..keys).map(|i| format!(r#""k{i}":{i}"#)).collect();
    format!("{{{}}}", entries.join(","))
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let inputs = [
        ("records_1k", records(1_000)),
        ("nested_200", nested(200)),
        ("escaped_1k", escaped_strings(1_000)),
        ("wide_object_50k", wide_object(50_000)),
    ];

    for (name, text) in &inputs {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("value", name), text, |b, text| {
            b.iter(|| black_box(parse(black_box(text))))
        });
    }

    let text = &inputs[0].1;
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("serde_json_factory/records_1k", |b| {
        let options = ParseOptions::default();
        b.iter(|| black_box(parse_with(black_box(text), &SerdeJsonFactory, &options)))
    });
    group.bench_function("serde_json_from_str/records_1k", |b| {
        b.iter(|| black_box(serde_json::from_str::<serde_json::Value>(black_box(text))))
    });

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for (name, text) in [
        ("records_1k", records(1_000)),
        ("escaped_1k", escaped_strings(1_000)),
    ] {
        let Ok(value) = parse(&text) else {
            continue;
        };
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("value", name), &value, |b, value| {
            b.iter(|| black_box(encode(black_box(value))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_encode);
criterion_main!(benches);
