//! Filter configuration layering
//!
//! Later layers win: built-in defaults, then the JSON config file, then
//! `URL_CACHE_*` environment variables, then command-line flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use url_bloom_cache::{FilterConfig, HashStrategy};

pub const ENV_SIZE_BITS: &str = "URL_CACHE_SIZE_BITS";
pub const ENV_HASH_COUNT: &str = "URL_CACHE_HASH_COUNT";
pub const ENV_STRATEGY: &str = "URL_CACHE_STRATEGY";

/// Values given explicitly on the command line
#[derive(Clone, Debug, Default)]
pub struct FlagOverrides {
    pub size_bits: Option<usize>,
    pub hash_count: Option<usize>,
    pub strategy: Option<HashStrategy>,
}

/// Read a JSON config file; missing fields keep their defaults
pub fn read_config_file(path: &Path) -> Result<FilterConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = serde_json::from_str(&raw)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    info!(path = %path.display(), "Loaded filter configuration from file");
    Ok(config)
}

/// Apply environment overrides read through `lookup`
///
/// Unparseable values are logged and ignored.
pub fn apply_env<F>(mut config: FilterConfig, lookup: F) -> FilterConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(ENV_SIZE_BITS) {
        match value.trim().parse() {
            Ok(size_bits) => config.size_bits = size_bits,
            Err(_) => warn!(value = %value, "{ENV_SIZE_BITS} must be a non-negative integer"),
        }
    }
    if let Some(value) = lookup(ENV_HASH_COUNT) {
        match value.trim().parse() {
            Ok(hash_count) => config.hash_count = hash_count,
            Err(_) => warn!(value = %value, "{ENV_HASH_COUNT} must be a non-negative integer"),
        }
    }
    if let Some(value) = lookup(ENV_STRATEGY) {
        match value.parse() {
            Ok(strategy) => config.hash_strategy = strategy,
            Err(e) => warn!(error = %e, "ignoring {ENV_STRATEGY}"),
        }
    }

    config
}

fn apply_flags(mut config: FilterConfig, flags: &FlagOverrides) -> FilterConfig {
    if let Some(size_bits) = flags.size_bits {
        config.size_bits = size_bits;
    }
    if let Some(hash_count) = flags.hash_count {
        config.hash_count = hash_count;
    }
    if let Some(strategy) = flags.strategy {
        config.hash_strategy = strategy;
    }
    config
}

/// Resolve and validate the effective filter configuration
pub fn load_config<F>(
    config_file: Option<&Path>,
    env_lookup: F,
    flags: &FlagOverrides,
) -> Result<FilterConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match config_file {
        Some(path) => read_config_file(path)?,
        None => FilterConfig::default(),
    };
    let config = apply_flags(apply_env(config, env_lookup), flags);

    config.validate().context("invalid filter configuration")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = load_config(None, env(&[]), &FlagOverrides::default()).unwrap();
        assert_eq!(config, FilterConfig::default());
        assert_eq!(config.size_bits, 5000);
        assert_eq!(config.hash_count, 3);
    }

    #[test]
    fn test_layers_apply_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filter.json");
        fs::write(
            &path,
            r#"{ "size_bits": 8000, "hash_count": 4, "hash_strategy": "rolling" }"#,
        )
        .unwrap();

        let config = load_config(
            Some(path.as_path()),
            env(&[(ENV_HASH_COUNT, "5")]),
            &FlagOverrides {
                strategy: Some(HashStrategy::DoubleHashing),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(config.size_bits, 8000);
        assert_eq!(config.hash_count, 5);
        assert_eq!(config.hash_strategy, HashStrategy::DoubleHashing);
    }

    #[test]
    fn test_flags_override_env() {
        let config = load_config(
            None,
            env(&[(ENV_SIZE_BITS, "100"), (ENV_STRATEGY, "rolling")]),
            &FlagOverrides {
                size_bits: Some(200),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(config.size_bits, 200);
        assert_eq!(config.hash_strategy, HashStrategy::Rolling);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let config = load_config(
            None,
            env(&[(ENV_SIZE_BITS, "lots"), (ENV_STRATEGY, "cuckoo")]),
            &FlagOverrides::default(),
        )
        .unwrap();

        assert_eq!(config, FilterConfig::default());
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let result = load_config(
            None,
            env(&[(ENV_SIZE_BITS, "0")]),
            &FlagOverrides::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(
            Some(dir.path().join("absent.json").as_path()),
            env(&[]),
            &FlagOverrides::default(),
        );
        assert!(result.is_err());
    }
}
