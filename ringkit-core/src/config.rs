// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict validation.
//!
//! Describes the buffer size and the randomized workload used by the
//! consistency check and the throughput comparison. Any invalid field is
//! reported as a `ValidationError` before anything runs.

use std::path::Path;

use serde::Deserialize;

use crate::error::{RingkitError, RingkitResult, ValidationError};
use crate::types::{Capacity, ChunkSize, WritePercent};

/// Raw buffer section as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBufferConfig {
    #[serde(default = "default_capacity")]
    capacity: usize,
}

fn default_capacity() -> usize {
    4096 * 10240 // 40MB
}

impl Default for RawBufferConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Raw workload section.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWorkloadConfig {
    #[serde(default = "default_operations")]
    operations: usize,
    /// Absent means `DEFAULT_MAX_CHUNK`, clamped to the buffer capacity.
    #[serde(default)]
    max_chunk: Option<usize>,
    #[serde(default = "default_write_percent")]
    write_percent: u8,
    #[serde(default)]
    seed: Option<u64>,
}

fn default_operations() -> usize {
    1_000_000
}

const DEFAULT_MAX_CHUNK: usize = 8192; // 8KB

fn default_write_percent() -> u8 {
    50
}

impl Default for RawWorkloadConfig {
    fn default() -> Self {
        Self {
            operations: default_operations(),
            max_chunk: None,
            write_percent: default_write_percent(),
            seed: None,
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    buffer: RawBufferConfig,
    #[serde(default)]
    workload: RawWorkloadConfig,
}

/// Validated buffer configuration.
#[derive(Debug, Clone)]
pub struct BufferConfig {
    pub capacity: Capacity,
}

/// Validated workload configuration.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    pub operations: usize,
    pub max_chunk: ChunkSize,
    pub write_percent: WritePercent,
    /// Fixed seed for reproducible runs. `None` lets the caller pick one.
    pub seed: Option<u64>,
}

/// Complete validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub buffer: BufferConfig,
    pub workload: WorkloadConfig,
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> RingkitResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(RingkitError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| RingkitError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Built-in defaults, as if an empty file had been loaded.
    pub fn defaults() -> RingkitResult<Config> {
        Self::validate(RawConfig::default())
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> RingkitResult<Config> {
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| RingkitError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?
        };

        Self::validate(raw)
    }

    /// Validate raw configuration and convert to validated types.
    fn validate(raw: RawConfig) -> RingkitResult<Config> {
        let capacity = Capacity::new(raw.buffer.capacity)?;

        if raw.workload.operations == 0 {
            return Err(ValidationError::InvalidFieldValue {
                field: "operations",
                value: "0".to_string(),
                reason: "Workload must contain at least one operation".to_string(),
            }
            .into());
        }

        let max_chunk = raw
            .workload
            .max_chunk
            .unwrap_or_else(|| DEFAULT_MAX_CHUNK.min(capacity.bytes()));
        let max_chunk = ChunkSize::new(max_chunk, capacity)?;
        let write_percent = WritePercent::new(raw.workload.write_percent)?;

        Ok(Config {
            buffer: BufferConfig { capacity },
            workload: WorkloadConfig {
                operations: raw.workload.operations,
                max_chunk,
                write_percent,
                seed: raw.workload.seed,
            },
        })
    }
}
