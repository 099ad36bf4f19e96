// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI command modules.

use std::time::{SystemTime, UNIX_EPOCH};

use ringkit_core::{Config, ConfigLoader, RingkitResult};

pub mod check;
pub mod info;
pub mod perf;
pub mod validate;

/// Load `path` if given, otherwise fall back to the built-in defaults.
fn load_config(path: Option<&str>) -> RingkitResult<Config> {
    match path {
        Some(path) => {
            tracing::info!(file = %path, "Loading configuration");
            ConfigLoader::load_file(path)
        }
        None => ConfigLoader::defaults(),
    }
}

/// Pick the workload seed: explicit override, then configuration, then the clock.
fn resolve_seed(explicit: Option<u64>, config: &Config) -> u64 {
    explicit.or(config.workload.seed).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_precedence() {
        let mut config = ConfigLoader::defaults().unwrap();
        config.workload.seed = Some(5);

        assert_eq!(resolve_seed(Some(9), &config), 9);
        assert_eq!(resolve_seed(None, &config), 5);
    }

    #[test]
    fn test_missing_config_path_uses_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.workload.operations, 1_000_000);
    }
}
