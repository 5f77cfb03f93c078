//! # URL Bloom Cache
//!
//! Probabilistic "have I seen this URL before" cache built on a Bloom filter.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure business logic, no I/O
//!   - `BloomFilter`: Fixed-size packed bit array queried through a hash bank
//!   - `HashBank`: `k` deterministic hash functions chosen at construction
//!   - `FilterConfig`: Configuration with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MembershipApi`: Driving port (add / contains)
//!   - `TraceSink`: Driven port (append-only trace lines)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `UrlCacheService`: Implements `MembershipApi` over a filter and a sink
//!
//! - **Handler Layer** (`handler/`): Command loop
//!   - `CommandHandler`: Dispatches `ADD` / `CONTAINS` lines
//!
//! - **Events Layer** (`events/`): Command message types
//!
//! - **Adapters Layer** (`adapters/`): `FileTraceSink`, `MemoryTraceSink`
//!
//! ## Invariants
//!
//! - No false negatives: if inserted, contains() MUST return true
//! - Expected FPR after n inserts: (1 - e^(-kn/m))^k
//! - Bits are only ever set; the bit array never changes size
//!
//! ## Usage Example
//!
//! ```
//! use url_bloom_cache::{BloomFilter, FilterConfigBuilder, HashStrategy};
//!
//! let config = FilterConfigBuilder::new()
//!     .size_bits(5000)
//!     .hash_count(3)
//!     .hash_strategy(HashStrategy::Standard)
//!     .build()?;
//!
//! let mut filter = BloomFilter::from_config(&config)?;
//! filter.insert(b"https://example1.com/page1");
//!
//! assert!(filter.contains(b"https://example1.com/page1"));
//! assert!(!filter.contains(b"https://totally-unseen-url.test"));
//! # Ok::<(), url_bloom_cache::FilterError>(())
//! ```
//!
//! ## Command Loop
//!
//! ```
//! use std::io::Cursor;
//! use url_bloom_cache::{CommandHandler, FilterConfig, MemoryTraceSink, UrlCacheService};
//!
//! let mut cache = UrlCacheService::from_config(&FilterConfig::default(), MemoryTraceSink::new())?;
//! let input = "ADD https://example1.com/page1\nCONTAINS https://example1.com/page1\n";
//! CommandHandler::new().run(Cursor::new(input), &mut cache)?;
//!
//! assert_eq!(
//!     cache.sink().lines(),
//!     &["Added: https://example1.com/page1", "URL Existence Check for https://example1.com/page1: True"]
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod events;
pub mod handler;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{FileTraceSink, MemoryTraceSink};
pub use domain::{BloomFilter, FilterConfig, FilterConfigBuilder, HashBank, HashFunction, HashStrategy};
pub use error::{CacheError, CommandError, FilterError};
pub use events::Command;
pub use handler::{CommandHandler, Outcome, RunSummary};
pub use metrics::{Metrics, MetricsSnapshot, OpTimer};
pub use ports::{MembershipApi, TraceSink};
pub use service::UrlCacheService;
