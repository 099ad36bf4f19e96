// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! ringkit CLI
//!
//! Command-line interface for inspecting, cross-checking and measuring the
//! ringkit byte ring buffers.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ringkit_core::BufferKind;

mod commands;

/// ringkit - fixed-capacity byte ring buffers
#[derive(Parser)]
#[command(name = "ringkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show page size and the geometry of both buffers
    Info {
        /// Requested buffer length in bytes
        #[arg(long)]
        capacity: Option<usize>,
    },

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        file: String,
    },

    /// Replay one workload on both buffers and compare every byte
    Check {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<String>,

        /// Number of operations, overriding the configuration
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        operations: Option<u64>,

        /// Workload seed, overriding the configuration
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Measure workload throughput of one or both buffers
    Perf {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<String>,

        /// Which implementation to measure
        #[arg(short, long, value_enum, default_value_t = KindSelection::Both)]
        kind: KindSelection,

        /// Directory to save a JSON report into
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,
    },
}

/// Buffer selection for `perf`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindSelection {
    Bounded,
    Mapped,
    Both,
}

impl KindSelection {
    pub fn kinds(self) -> &'static [BufferKind] {
        match self {
            KindSelection::Bounded => &[BufferKind::Bounded],
            KindSelection::Mapped => &[BufferKind::Mapped],
            KindSelection::Both => &BufferKind::ALL,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Info { capacity } => commands::info::execute(capacity),
        Commands::Validate { file } => commands::validate::execute(&file),
        Commands::Check {
            config,
            operations,
            seed,
        } => commands::check::execute(config.as_deref(), operations, seed),
        Commands::Perf {
            config,
            kind,
            output,
        } => commands::perf::execute(config.as_deref(), kind, output.as_deref()),
    }
}
