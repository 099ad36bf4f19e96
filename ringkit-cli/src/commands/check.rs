// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `ringkit check` command - Cross-check both buffers on one workload.

use ringkit_benchmark::{cross_check, Workload};
use ringkit_core::{BoundedRingBuffer, MappedRingBuffer};

use super::{load_config, resolve_seed};

pub fn execute(
    config_path: Option<&str>,
    operations: Option<u64>,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path)?;
    if let Some(operations) = operations {
        config.workload.operations = operations as usize;
    }
    let seed = resolve_seed(seed, &config);
    let capacity = config.buffer.capacity.bytes();

    tracing::info!(
        capacity,
        operations = config.workload.operations,
        seed,
        "Running consistency check"
    );

    let workload = Workload::from_config(&config.workload, seed);
    let mut plain = BoundedRingBuffer::new(capacity)?;
    let mut mapped = MappedRingBuffer::new(capacity)?;

    match cross_check(&mut plain, &mut mapped, &workload) {
        Ok(report) => {
            println!("✓ Implementations agree");
            println!();
            println!("  Seed:           {}", seed);
            println!("  Operations:     {}", report.operations);
            println!("  Writes:         {}", report.writes);
            println!("  Reads:          {}", report.reads);
            println!("  Skipped:        {}", report.skipped);
            println!("  Bytes Written:  {}", report.bytes_written);
            println!("  Bytes Read:     {}", report.bytes_read);
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Consistency check failed (seed {}):", seed);
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
