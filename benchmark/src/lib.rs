// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! ringkit Benchmarking Framework
//!
//! Drives ringkit's two ring buffer implementations with seeded random
//! workloads.
//!
//! - **Workloads**: reproducible read/write sequences replayed against any [`ringkit_core::ByteRing`]
//! - **Consistency**: lockstep replay on both buffers, comparing every byte
//! - **Throughput**: timed replays collected into JSON reports
//!
//! Microbenchmarks live in `benches/` and run through criterion.

pub mod consistency;
pub mod metrics;
pub mod reporter;
pub mod workload;

pub use consistency::{cross_check, CheckError, ConsistencyReport};
pub use metrics::{BenchmarkReport, BenchmarkResult, SystemInfo, ThroughputSample};
pub use reporter::{JsonReporter, ReporterError};
pub use workload::{replay, OpKind, Operation, Workload};
