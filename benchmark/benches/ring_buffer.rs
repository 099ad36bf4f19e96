// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Ring buffer microbenchmarks.
//!
//! Compares the bounded and mapped buffers on write/read round trips at
//! various payload sizes, on a boundary-crossing copy, and on a full
//! workload replay.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ringkit_benchmark::workload::{replay, Workload};
use ringkit_core::{BoundedRingBuffer, ByteRing, MappedRingBuffer};
use std::time::Duration;

/// Payload sizes to benchmark (in bytes).
const PAYLOAD_SIZES: &[usize] = &[64, 256, 1024, 4096, 16384, 65536];

/// Buffer length used by every benchmark.
const BUFFER_SIZE: usize = 1024 * 1024;

fn roundtrip<R: ByteRing>(ring: &mut R, payload: &[u8], out: &mut [u8]) {
    ring.write(black_box(payload)).expect("Write failed");
    ring.read(out).expect("Read failed");
    black_box(out);
}

/// Benchmark a full write-read cycle on both implementations.
fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_buffer_roundtrip");
    group.measurement_time(Duration::from_secs(5));

    for &size in PAYLOAD_SIZES {
        group.throughput(Throughput::Bytes(size as u64 * 2)); // Write + read
        let payload = vec![0xABu8; size];

        group.bench_with_input(BenchmarkId::new("bounded", size), &size, |b, &size| {
            let mut buffer =
                BoundedRingBuffer::new(BUFFER_SIZE).expect("Failed to create bounded buffer");
            let mut out = vec![0u8; size];
            b.iter(|| roundtrip(&mut buffer, &payload, &mut out));
        });

        group.bench_with_input(BenchmarkId::new("mapped", size), &size, |b, &size| {
            let mut buffer =
                MappedRingBuffer::new(BUFFER_SIZE).expect("Failed to create mapped buffer");
            let mut out = vec![0u8; size];
            b.iter(|| roundtrip(&mut buffer, &payload, &mut out));
        });
    }

    group.finish();
}

/// Benchmark copies that straddle the physical end of the mapped buffer.
///
/// The cursor advances by a size coprime to the mapping length, so most
/// iterations land at a different offset and many cross the boundary.
fn bench_boundary_crossing(c: &mut Criterion) {
    let mut group = c.benchmark_group("mapped_boundary_crossing");
    group.measurement_time(Duration::from_secs(3));

    for &size in &[4095usize, 16383, 65535] {
        group.throughput(Throughput::Bytes(size as u64 * 2));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut buffer =
                MappedRingBuffer::new(size * 2).expect("Failed to create mapped buffer");
            let payload = vec![0x5Au8; size];
            b.iter(|| {
                buffer.write(black_box(&payload));
                black_box(buffer.peek());
                buffer.consume(size);
            });
        });
    }

    group.finish();
}

/// Benchmark replaying a seeded random workload.
fn bench_workload_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("workload_replay");
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(20);

    let workload = Workload::generate(10_000, 8192, 50, 42);

    group.bench_function("bounded", |b| {
        b.iter(|| {
            let mut buffer =
                BoundedRingBuffer::new(BUFFER_SIZE).expect("Failed to create bounded buffer");
            black_box(replay(&mut buffer, &workload, 7).expect("Replay failed"));
        });
    });

    group.bench_function("mapped", |b| {
        b.iter(|| {
            let mut buffer =
                MappedRingBuffer::new(BUFFER_SIZE).expect("Failed to create mapped buffer");
            black_box(replay(&mut buffer, &workload, 7).expect("Replay failed"));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_roundtrip,
    bench_boundary_crossing,
    bench_workload_replay
);
criterion_main!(benches);
