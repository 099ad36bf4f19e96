// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Throughput metrics and report types.
//!
//! These are the serializable records written by [`crate::reporter::JsonReporter`].

use chrono::{DateTime, Utc};
use ringkit_core::BufferKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use sysinfo::System;

/// Bytes moved and time spent by one workload replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThroughputSample {
    /// Bytes accepted by writes
    pub bytes_written: u64,
    /// Bytes returned by reads
    pub bytes_read: u64,
    /// Operations skipped because nothing was available
    pub skipped: u64,
    /// Wall-clock duration of the replay in nanoseconds
    pub duration_ns: u64,
}

impl ThroughputSample {
    pub fn total_bytes(&self) -> u64 {
        self.bytes_written + self.bytes_read
    }

    /// Combined read and write throughput in bytes per second.
    pub fn bytes_per_sec(&self) -> f64 {
        if self.duration_ns == 0 {
            return 0.0;
        }
        self.total_bytes() as f64 / (self.duration_ns as f64 / 1_000_000_000.0)
    }

    /// Format throughput in human-readable form.
    pub fn format_bytes_per_sec(bps: f64) -> String {
        if bps < 1_000.0 {
            format!("{:.2} B/s", bps)
        } else if bps < 1_000_000.0 {
            format!("{:.2} KB/s", bps / 1_000.0)
        } else if bps < 1_000_000_000.0 {
            format!("{:.2} MB/s", bps / 1_000_000.0)
        } else {
            format!("{:.2} GB/s", bps / 1_000_000_000.0)
        }
    }
}

/// System information captured at benchmark time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub os_version: String,
    pub kernel_version: Option<String>,
    pub cpu_model: String,
    pub cpu_cores: usize,
    pub memory_bytes: u64,
    /// Page size the mapped buffer rounds to, if it could be queried
    pub page_size: Option<usize>,
}

impl SystemInfo {
    /// Collect current system information.
    pub fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu();
        sys.refresh_memory();

        Self {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version(),
            cpu_model: sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            cpu_cores: sys.cpus().len(),
            memory_bytes: sys.total_memory(),
            page_size: ringkit_core::ring::page_size().ok(),
        }
    }
}

/// Throughput of one implementation over one workload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub name: String,
    pub kind: BufferKind,
    /// Requested buffer length in bytes
    pub capacity: usize,
    /// Number of workload operations replayed
    pub operations: u64,
    pub throughput: ThroughputSample,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl BenchmarkResult {
    pub fn new(
        name: impl Into<String>,
        kind: BufferKind,
        capacity: usize,
        operations: u64,
        throughput: ThroughputSample,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            capacity,
            operations,
            throughput,
            metadata: HashMap::new(),
        }
    }

    /// Add metadata to the result. Values that fail to serialize are skipped.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.metadata.insert(key.into(), value);
            }
            Err(e) => tracing::warn!(error = %e, "Dropping unserializable metadata"),
        }
        self
    }
}

/// Complete report for one `perf` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub benchmark_suite: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub system_info: SystemInfo,
    pub results: Vec<BenchmarkResult>,
}

impl BenchmarkReport {
    pub fn new() -> Self {
        Self {
            benchmark_suite: "ringkit-throughput".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            system_info: SystemInfo::collect(),
            results: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: BenchmarkResult) {
        self.results.push(result);
    }

    pub fn result(&self, kind: BufferKind) -> Option<&BenchmarkResult> {
        self.results.iter().find(|r| r.kind == kind)
    }

    /// Mapped over bounded throughput, when both were measured.
    pub fn speedup(&self) -> Option<f64> {
        let bounded = self.result(BufferKind::Bounded)?.throughput.bytes_per_sec();
        let mapped = self.result(BufferKind::Mapped)?.throughput.bytes_per_sec();
        if bounded == 0.0 {
            return None;
        }
        Some(mapped / bounded)
    }
}

impl Default for BenchmarkReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(total: u64, duration_ns: u64) -> ThroughputSample {
        ThroughputSample {
            bytes_written: total / 2,
            bytes_read: total - total / 2,
            skipped: 0,
            duration_ns,
        }
    }

    #[test]
    fn test_throughput_calculation() {
        let s = sample(1_000_000, 1_000_000_000);
        assert!((s.bytes_per_sec() - 1_000_000.0).abs() < 0.01);
        assert_eq!(sample(10, 0).bytes_per_sec(), 0.0);
    }

    #[test]
    fn test_throughput_format() {
        assert_eq!(ThroughputSample::format_bytes_per_sec(500.0), "500.00 B/s");
        assert_eq!(ThroughputSample::format_bytes_per_sec(1500.0), "1.50 KB/s");
        assert_eq!(ThroughputSample::format_bytes_per_sec(2_500_000.0), "2.50 MB/s");
        assert_eq!(
            ThroughputSample::format_bytes_per_sec(3_000_000_000.0),
            "3.00 GB/s"
        );
    }

    #[test]
    fn test_system_info_collect() {
        let info = SystemInfo::collect();
        assert!(!info.os.is_empty());
        assert!(info.page_size.is_some());
    }

    #[test]
    fn test_speedup() {
        let mut report = BenchmarkReport::new();
        assert!(report.speedup().is_none());

        report.add_result(BenchmarkResult::new(
            "bounded",
            BufferKind::Bounded,
            4096,
            10,
            sample(1000, 1_000_000),
        ));
        report.add_result(BenchmarkResult::new(
            "mapped",
            BufferKind::Mapped,
            4096,
            10,
            sample(3000, 1_000_000),
        ));

        let speedup = report.speedup().unwrap();
        assert!((speedup - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_benchmark_result_serialization() {
        let result = BenchmarkResult::new(
            "mapped_replay",
            BufferKind::Mapped,
            8192,
            100,
            sample(4096, 1000),
        )
        .with_metadata("max_chunk", 512);

        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("mapped_replay"));
        assert!(json.contains("\"mapped\""));
        assert!(json.contains("max_chunk"));
    }
}
