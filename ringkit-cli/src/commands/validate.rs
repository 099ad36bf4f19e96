// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `ringkit validate` command - Validate configuration file.

use std::fmt::Write;

use ringkit_core::{Config, ConfigLoader};

pub fn execute(file: &str) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(file = %file, "Validating configuration");

    match ConfigLoader::load_file(file) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!();
            print!("{}", describe(&config)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed:");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}

fn describe(config: &Config) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Buffer Settings:")?;
    writeln!(out, "  Capacity:       {} bytes", config.buffer.capacity.bytes())?;
    writeln!(out)?;
    writeln!(out, "Workload Settings:")?;
    writeln!(out, "  Operations:     {}", config.workload.operations)?;
    writeln!(out, "  Max Chunk:      {} bytes", config.workload.max_chunk.bytes())?;
    writeln!(out, "  Write Percent:  {}%", config.workload.write_percent.value())?;
    match config.workload.seed {
        Some(seed) => writeln!(out, "  Seed:           {}", seed)?,
        None => writeln!(out, "  Seed:           (derived from clock)")?,
    }
    Ok(out)
}
