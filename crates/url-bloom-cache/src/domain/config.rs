//! Filter configuration and validation
//!
//! # Example
//!
//! ```
//! use url_bloom_cache::domain::{FilterConfigBuilder, HashStrategy};
//!
//! let config = FilterConfigBuilder::new()
//!     .size_bits(10_000)
//!     .hash_count(4)
//!     .hash_strategy(HashStrategy::Rolling)
//!     .build()
//!     .expect("Valid config");
//! assert_eq!(config.size_bits, 10_000);
//! ```

use serde::{Deserialize, Serialize};

use super::hash_functions::{HashBank, HashStrategy};
use super::parameters::{calculate_fpr, calculate_optimal_parameters, MAX_HASH_COUNT};
use crate::error::FilterError;

/// Reference bit-array size
pub const DEFAULT_SIZE_BITS: usize = 5000;
/// Reference number of hash functions
pub const DEFAULT_HASH_COUNT: usize = 3;

/// Shape of a Bloom filter: `m`, `k` and how the hash bank is built
///
/// With the defaults (`m = 5000`, `k = 3`) the expected false positive rate
/// is about 1.7% after 500 URLs and about 9.2% after 1000 URLs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Size of the bit array (m)
    pub size_bits: usize,
    /// Number of hash functions (k)
    pub hash_count: usize,
    /// Hash bank strategy
    pub hash_strategy: HashStrategy,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            size_bits: DEFAULT_SIZE_BITS,
            hash_count: DEFAULT_HASH_COUNT,
            hash_strategy: HashStrategy::Standard,
        }
    }
}

impl FilterConfig {
    /// Create a new configuration with validation
    pub fn new(
        size_bits: usize,
        hash_count: usize,
        hash_strategy: HashStrategy,
    ) -> Result<Self, FilterError> {
        let config = Self {
            size_bits,
            hash_count,
            hash_strategy,
        };
        config.validate()?;
        Ok(config)
    }

    /// Derive `m` and `k` for `expected_elements` items at `target_fpr`
    pub fn for_capacity(expected_elements: usize, target_fpr: f64) -> Result<Self, FilterError> {
        if expected_elements == 0 {
            return Err(FilterError::InvalidConfig(
                "expected_elements must be greater than 0".to_string(),
            ));
        }
        if !(target_fpr > 0.0 && target_fpr < 1.0) {
            return Err(FilterError::InvalidConfig(format!(
                "target false positive rate must be in (0, 1), got {target_fpr}"
            )));
        }

        let params = calculate_optimal_parameters(expected_elements, target_fpr);
        Self::new(params.size_bits, params.hash_count, HashStrategy::Standard)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.size_bits == 0 {
            return Err(FilterError::InvalidSize {
                size: self.size_bits,
            });
        }

        if self.hash_count == 0 || self.hash_count > MAX_HASH_COUNT {
            return Err(FilterError::InvalidHashCount {
                count: self.hash_count,
                min: 1,
                max: MAX_HASH_COUNT,
            });
        }

        Ok(())
    }

    /// Build the hash bank this configuration describes
    pub fn hash_bank(&self) -> Result<HashBank, FilterError> {
        self.validate()?;
        HashBank::from_strategy(self.hash_strategy, self.hash_count)
    }

    /// Expected false positive rate after `n` insertions
    pub fn expected_fpr(&self, n: usize) -> f64 {
        calculate_fpr(self.size_bits, n, self.hash_count)
    }

    /// Builder-style method to set the bit-array size
    pub fn with_size_bits(mut self, size_bits: usize) -> Self {
        self.size_bits = size_bits;
        self
    }

    /// Builder-style method to set the hash count
    pub fn with_hash_count(mut self, hash_count: usize) -> Self {
        self.hash_count = hash_count;
        self
    }

    /// Builder-style method to set the hash strategy
    pub fn with_hash_strategy(mut self, strategy: HashStrategy) -> Self {
        self.hash_strategy = strategy;
        self
    }
}

/// Builder for FilterConfig with validation
#[derive(Default)]
pub struct FilterConfigBuilder {
    size_bits: Option<usize>,
    hash_count: Option<usize>,
    hash_strategy: Option<HashStrategy>,
}

impl FilterConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bit-array size (m)
    pub fn size_bits(mut self, bits: usize) -> Self {
        self.size_bits = Some(bits);
        self
    }

    /// Set the number of hash functions (k)
    pub fn hash_count(mut self, count: usize) -> Self {
        self.hash_count = Some(count);
        self
    }

    /// Set the hash bank strategy
    pub fn hash_strategy(mut self, strategy: HashStrategy) -> Self {
        self.hash_strategy = Some(strategy);
        self
    }

    /// Build the FilterConfig, validating all parameters
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation
    pub fn build_unchecked(self) -> FilterConfig {
        let defaults = FilterConfig::default();

        FilterConfig {
            size_bits: self.size_bits.unwrap_or(defaults.size_bits),
            hash_count: self.hash_count.unwrap_or(defaults.hash_count),
            hash_strategy: self.hash_strategy.unwrap_or(defaults.hash_strategy),
        }
    }
}
