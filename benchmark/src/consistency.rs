// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Cross-implementation consistency checking.
//!
//! Both buffers are driven with the same workload. Every write and read is
//! sized to what both buffers can serve at that moment, so any difference in
//! returned byte counts or contents is a bug in one of them.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use ringkit_core::{BoundedRingBuffer, BufferKind, MappedRingBuffer, RingError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::workload::{OpKind, Workload};

/// Errors raised by [`cross_check`].
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Ring buffer error at operation {index}: {source}")]
    Ring {
        index: usize,
        #[source]
        source: RingError,
    },

    #[error("{implementation} buffer moved {actual} bytes at operation {index}, expected {expected}")]
    ShortTransfer {
        index: usize,
        implementation: BufferKind,
        expected: usize,
        actual: usize,
    },

    #[error("Implementations returned different bytes at operation {index} ({length} bytes)")]
    DataMismatch { index: usize, length: usize },

    #[error("Implementations disagree on stored data after operation {index}: bounded {bounded}, mapped {mapped}")]
    LevelMismatch {
        index: usize,
        bounded: usize,
        mapped: usize,
    },
}

/// Summary of a successful consistency run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub operations: usize,
    pub writes: usize,
    pub reads: usize,
    pub skipped: usize,
    pub bytes_written: u64,
    pub bytes_read: u64,
}

/// Replay `workload` on both buffers in lockstep and compare every result.
///
/// Write payloads are random bytes seeded from the workload seed.
pub fn cross_check(
    plain: &mut BoundedRingBuffer,
    mapped: &mut MappedRingBuffer,
    workload: &Workload,
) -> Result<ConsistencyReport, CheckError> {
    let mut rng = StdRng::seed_from_u64(workload.seed());
    let mut data = vec![0u8; workload.max_chunk()];
    let mut from_plain = vec![0u8; workload.max_chunk()];
    let mut from_mapped = vec![0u8; workload.max_chunk()];
    let mut report = ConsistencyReport {
        operations: workload.len(),
        ..Default::default()
    };

    for (index, op) in workload.operations().iter().enumerate() {
        match op.kind {
            OpKind::Write => {
                let size = op
                    .chunk
                    .min(plain.available_space())
                    .min(mapped.available_space());
                if size == 0 {
                    report.skipped += 1;
                    continue;
                }
                rng.fill_bytes(&mut data[..size]);

                let written = plain
                    .write(&data[..size])
                    .map_err(|source| CheckError::Ring { index, source })?;
                expect_transfer(index, BufferKind::Bounded, size, written)?;
                expect_transfer(index, BufferKind::Mapped, size, mapped.write(&data[..size]))?;

                report.writes += 1;
                report.bytes_written += size as u64;
            }
            OpKind::Read => {
                let size = op
                    .chunk
                    .min(plain.available_data())
                    .min(mapped.available_data());
                if size == 0 {
                    report.skipped += 1;
                    continue;
                }

                let read = plain
                    .read(&mut from_plain[..size])
                    .map_err(|source| CheckError::Ring { index, source })?;
                expect_transfer(index, BufferKind::Bounded, size, read)?;
                expect_transfer(
                    index,
                    BufferKind::Mapped,
                    size,
                    mapped.read(&mut from_mapped[..size]),
                )?;

                if from_plain[..size] != from_mapped[..size] {
                    return Err(CheckError::DataMismatch {
                        index,
                        length: size,
                    });
                }

                report.reads += 1;
                report.bytes_read += size as u64;
            }
        }

        if plain.available_data() != mapped.available_data() {
            return Err(CheckError::LevelMismatch {
                index,
                bounded: plain.available_data(),
                mapped: mapped.available_data(),
            });
        }
    }

    tracing::debug!(
        operations = report.operations,
        writes = report.writes,
        reads = report.reads,
        "Consistency check passed"
    );

    Ok(report)
}

fn expect_transfer(
    index: usize,
    implementation: BufferKind,
    expected: usize,
    actual: usize,
) -> Result<(), CheckError> {
    if actual == expected {
        Ok(())
    } else {
        Err(CheckError::ShortTransfer {
            index,
            implementation,
            expected,
            actual,
        })
    }
}
