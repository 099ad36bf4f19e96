// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Randomized read/write workloads.
//!
//! A workload is generated once from a seed and can then be replayed against
//! any [`ByteRing`], so two implementations see exactly the same sequence of
//! requests. Each request is clamped to what the buffer reports as available
//! before it is issued.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use ringkit_core::{ByteRing, RingError, WorkloadConfig};
use serde::{Deserialize, Serialize};

use crate::metrics::ThroughputSample;

/// Direction of a single workload step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    Write,
    Read,
}

/// A single workload step: a direction and a requested chunk size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub kind: OpKind,
    pub chunk: usize,
}

/// Seeded sequence of operations.
#[derive(Debug, Clone)]
pub struct Workload {
    seed: u64,
    max_chunk: usize,
    operations: Vec<Operation>,
}

impl Workload {
    /// Generate `count` operations with chunk sizes in `1..=max_chunk`.
    ///
    /// Roughly `write_percent` percent of the operations are writes. The same
    /// arguments always produce the same workload.
    pub fn generate(count: usize, max_chunk: usize, write_percent: u8, seed: u64) -> Self {
        let max_chunk = max_chunk.max(1);
        let mut rng = StdRng::seed_from_u64(seed);

        let operations = (0..count)
            .map(|_| {
                let kind = if rng.gen_range(0..100u8) < write_percent {
                    OpKind::Write
                } else {
                    OpKind::Read
                };
                Operation {
                    kind,
                    chunk: rng.gen_range(1..=max_chunk),
                }
            })
            .collect();

        Self {
            seed,
            max_chunk,
            operations,
        }
    }

    /// Generate a workload from validated configuration.
    pub fn from_config(config: &WorkloadConfig, seed: u64) -> Self {
        Self::generate(
            config.operations,
            config.max_chunk.bytes(),
            config.write_percent.value(),
            seed,
        )
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn max_chunk(&self) -> usize {
        self.max_chunk
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Replay `workload` against `ring`, timing the whole run.
///
/// Write payloads are random bytes drawn from `data_seed`. Generating them is
/// part of the measured time, for both implementations alike.
pub fn replay<R: ByteRing + ?Sized>(
    ring: &mut R,
    workload: &Workload,
    data_seed: u64,
) -> Result<ThroughputSample, RingError> {
    let mut rng = StdRng::seed_from_u64(data_seed);
    let mut write_data = vec![0u8; workload.max_chunk()];
    let mut read_data = vec![0u8; workload.max_chunk()];
    let mut outcome = ThroughputSample::default();

    let start = Instant::now();

    for op in workload.operations() {
        match op.kind {
            OpKind::Write => {
                let available = ring.available_space();
                if available == 0 {
                    outcome.skipped += 1;
                    continue;
                }
                let chunk = op.chunk.min(available);
                rng.fill_bytes(&mut write_data[..chunk]);
                outcome.bytes_written += ring.write(&write_data[..chunk])? as u64;
            }
            OpKind::Read => {
                let available = ring.available_data();
                if available == 0 {
                    outcome.skipped += 1;
                    continue;
                }
                let chunk = op.chunk.min(available);
                outcome.bytes_read += ring.read(&mut read_data[..chunk])? as u64;
            }
        }
    }

    outcome.duration_ns = start.elapsed().as_nanos() as u64;
    Ok(outcome)
}
