use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hycs::{format, ControlFile, EncodeOptions, Scalar};

const CONTROL: &str = include_str!("../tests/fixtures/control.txt");

pub fn scalar_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar");
    for data in ["24", "-106.50", "5.00E+06"].iter() {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("f64", data), data, |b, data| {
            b.iter(|| Scalar::new(black_box(data)).to_f64())
        });
    }
    group.finish();
}

pub fn format_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");
    group.bench_function("repr", |b| b.iter(|| format::repr(black_box(130.87))));
    group.bench_function("sci2", |b| b.iter(|| format::sci2(black_box(2.5e5))));
    group.bench_function("fixed", |b| b.iter(|| format::fixed(black_box(10.0), 5, 1)));
    group.bench_function("integer", |b| b.iter(|| format::integer(black_box(10000))));
    group.finish();
}

pub fn control_benchmark(c: &mut Criterion) {
    let lines: Vec<&str> = CONTROL.lines().collect();
    let control = ControlFile::decode(&lines).unwrap().control;

    let mut group = c.benchmark_group("control");
    group.throughput(Throughput::Bytes(CONTROL.len() as u64));
    group.bench_function("decode", |b| {
        b.iter(|| ControlFile::decode(black_box(&lines)).unwrap())
    });
    group.bench_function("encode", |b| {
        b.iter(|| black_box(&control).encode(&EncodeOptions::new()))
    });
    group.bench_function("encode-annotated", |b| {
        let options = EncodeOptions {
            annotate: true,
            ..EncodeOptions::new()
        };
        b.iter(|| black_box(&control).encode(&options))
    });
    group.finish();
}

criterion_group!(
    benches,
    scalar_benchmark,
    format_benchmark,
    control_benchmark
);
criterion_main!(benches);
