// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `ringkit perf` command - Measure workload throughput.
//!
//! One workload is generated and replayed on each selected implementation,
//! so the numbers are directly comparable.

use std::path::Path;

use ringkit_benchmark::{
    replay, BenchmarkReport, BenchmarkResult, JsonReporter, ThroughputSample, Workload,
};
use ringkit_core::{BoundedRingBuffer, BufferKind, ByteRing, MappedRingBuffer, RingError};

use super::{load_config, resolve_seed};
use crate::KindSelection;

fn build_buffer(kind: BufferKind, capacity: usize) -> Result<Box<dyn ByteRing>, RingError> {
    Ok(match kind {
        BufferKind::Bounded => Box::new(BoundedRingBuffer::new(capacity)?),
        BufferKind::Mapped => Box::new(MappedRingBuffer::new(capacity)?),
    })
}

pub fn execute(
    config_path: Option<&str>,
    selection: KindSelection,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let seed = resolve_seed(None, &config);
    let capacity = config.buffer.capacity.bytes();

    tracing::info!(
        capacity,
        operations = config.workload.operations,
        seed,
        "Generating workload"
    );
    let workload = Workload::from_config(&config.workload, seed);

    let mut report = BenchmarkReport::new();
    println!("Buffer Length: {} bytes, {} operations, seed {}", capacity, workload.len(), seed);
    println!();

    for &kind in selection.kinds() {
        let mut ring = build_buffer(kind, capacity)?;
        tracing::info!(kind = %kind, "Replaying workload");
        let sample = replay(ring.as_mut(), &workload, seed)?;

        println!(
            "{:<8} {:>12}  ({} bytes in {:.3} ms, {} skipped)",
            kind,
            ThroughputSample::format_bytes_per_sec(sample.bytes_per_sec()),
            sample.total_bytes(),
            sample.duration_ns as f64 / 1_000_000.0,
            sample.skipped
        );

        report.add_result(
            BenchmarkResult::new(
                format!("{}_replay", kind),
                kind,
                capacity,
                workload.len() as u64,
                sample,
            )
            .with_metadata("max_chunk", workload.max_chunk())
            .with_metadata("write_percent", config.workload.write_percent.value())
            .with_metadata("seed", seed),
        );
    }

    if let Some(speedup) = report.speedup() {
        println!();
        println!("Mapped / bounded: {:.2}x", speedup);
    }

    if let Some(dir) = output {
        let reporter = JsonReporter::new(dir)?;
        let path = reporter.save(&report)?;
        println!();
        println!("✓ Report saved to {}", path.display());
    }

    Ok(())
}
