// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers for validated inputs.
//!
//! All types validate their invariants at creation time, so a value that
//! reaches a ring buffer constructor or the workload generator is known good.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Largest requested capacity accepted from configuration: 1 GiB.
pub const MAX_CAPACITY: usize = 1024 * 1024 * 1024;

/// Validated requested ring capacity in bytes.
/// Must be between 1 and MAX_CAPACITY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity(usize);

impl Capacity {
    /// Create a new Capacity with bounds validation.
    pub fn new(bytes: usize) -> Result<Self, ValidationError> {
        if !(1..=MAX_CAPACITY).contains(&bytes) {
            return Err(ValidationError::InvalidFieldValue {
                field: "capacity",
                value: bytes.to_string(),
                reason: format!("Must be between 1 and {} bytes", MAX_CAPACITY),
            });
        }
        Ok(Self(bytes))
    }

    /// Get the capacity in bytes.
    pub fn bytes(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}

/// Validated upper bound for a single workload chunk.
/// Must be non-zero and must not exceed the buffer capacity it is used with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSize(usize);

impl ChunkSize {
    /// Create a new ChunkSize bounded by `capacity`.
    pub fn new(bytes: usize, capacity: Capacity) -> Result<Self, ValidationError> {
        if bytes == 0 || bytes > capacity.bytes() {
            return Err(ValidationError::InvalidFieldValue {
                field: "max_chunk",
                value: bytes.to_string(),
                reason: format!("Must be between 1 and the buffer capacity ({})", capacity),
            });
        }
        Ok(Self(bytes))
    }

    pub fn bytes(&self) -> usize {
        self.0
    }
}

/// Validated share of write operations in a workload, in percent.
/// Must be in 1..=99 so both reads and writes occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WritePercent(u8);

impl WritePercent {
    pub fn new(percent: u8) -> Result<Self, ValidationError> {
        if !(1..=99).contains(&percent) {
            return Err(ValidationError::InvalidFieldValue {
                field: "write_percent",
                value: percent.to_string(),
                reason: "Must be between 1 and 99".to_string(),
            });
        }
        Ok(Self(percent))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Ring buffer implementation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferKind {
    /// Modulo-indexed heap buffer, rejects writes that do not fit.
    Bounded,
    /// Double-mapped virtual memory buffer, truncates writes that do not fit.
    Mapped,
}

impl BufferKind {
    pub const ALL: [BufferKind; 2] = [BufferKind::Bounded, BufferKind::Mapped];

    pub fn as_str(&self) -> &'static str {
        match self {
            BufferKind::Bounded => "bounded",
            BufferKind::Mapped => "mapped",
        }
    }
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BufferKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bounded" => Ok(Self::Bounded),
            "mapped" => Ok(Self::Mapped),
            _ => Err(ValidationError::UnknownBufferKind {
                value: s.to_string(),
            }),
        }
    }
}
