//! Benchmarks for argument conversion

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mbtool::convert::{coil_payload, encode_registers, parse_bytes};

fn convert_benchmarks(c: &mut Criterion) {
    let registers: Vec<String> = (0..123u32).map(|v| (v * 500).to_string()).collect();
    let coils: Vec<String> = (0..64).map(|i| (i % 2).to_string()).collect();
    let bytes: Vec<String> = (0..=255u32).map(|v| v.to_string()).collect();

    c.bench_function("encode_registers_123", |b| {
        b.iter(|| encode_registers(black_box(&registers), 16))
    });

    c.bench_function("coil_payload_64", |b| b.iter(|| coil_payload(black_box(&coils))));

    c.bench_function("parse_bytes_256", |b| b.iter(|| parse_bytes(black_box(&bytes))));
}

criterion_group!(benches, convert_benchmarks);
criterion_main!(benches);
