//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Core Bloom filter implementation
//! - Hash bank
//! - Parameter calculations
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod bloom_filter;
pub mod config;
pub mod hash_functions;
pub mod parameters;

pub use bloom_filter::BloomFilter;
pub use config::{FilterConfig, FilterConfigBuilder, DEFAULT_HASH_COUNT, DEFAULT_SIZE_BITS};
pub use hash_functions::{HashBank, HashFunction, HashStrategy};
pub use parameters::{calculate_fpr, calculate_optimal_parameters, BloomFilterParams};
