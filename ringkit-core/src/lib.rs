//! ringkit Core Library
//!
//! Fixed-capacity byte ring buffers with two storage strategies: a
//! modulo-indexed heap buffer and a double-mapped virtual memory buffer.
//! Also provides validated configuration types and the YAML loader used by
//! the CLI and the benchmark harness.

pub mod config;
pub mod error;
pub mod ring;
pub mod types;

// Re-export commonly used types
pub use config::{BufferConfig, Config, ConfigLoader, WorkloadConfig};
pub use error::{RingError, RingkitError, RingkitResult, ValidationError};
pub use ring::{BoundedRingBuffer, ByteRing, MappedRingBuffer, MirroredRegion};
pub use types::{BufferKind, Capacity, ChunkSize, WritePercent};
