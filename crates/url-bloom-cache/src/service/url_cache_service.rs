//! URL Cache Service
//!
//! Wraps a [`BloomFilter`] with item normalization, metrics and a trace sink.
//! Every operation writes exactly one line:
//!
//! ```text
//! Added: <item>
//! URL Existence Check for <item>: True|False
//! ```

use std::time::Instant;

use tracing::trace;

use crate::domain::{BloomFilter, FilterConfig};
use crate::error::CacheError;
use crate::metrics::Metrics;
use crate::ports::{MembershipApi, TraceSink};

/// Trace line for an insertion
pub fn added_line(item: &str) -> String {
    format!("Added: {item}")
}

/// Trace line for a membership check
pub fn existence_line(item: &str, exists: bool) -> String {
    let answer = if exists { "True" } else { "False" };
    format!("URL Existence Check for {item}: {answer}")
}

/// Bloom-filter backed URL cache implementing [`MembershipApi`]
///
/// Items are trimmed of surrounding whitespace before hashing, so
/// `"https://a.test\n"` and `"https://a.test"` are the same URL.
pub struct UrlCacheService<S: TraceSink> {
    filter: BloomFilter,
    sink: S,
    metrics: Metrics,
}

impl<S: TraceSink> UrlCacheService<S> {
    /// Create a service around an existing filter
    pub fn new(filter: BloomFilter, sink: S) -> Self {
        Self {
            filter,
            sink,
            metrics: Metrics::new(),
        }
    }

    /// Create a service with a fresh filter built from `config`
    ///
    /// An invalid configuration surfaces as [`CacheError::Filter`].
    pub fn from_config(config: &FilterConfig, sink: S) -> Result<Self, CacheError> {
        Ok(Self::new(BloomFilter::from_config(config)?, sink))
    }

    pub fn filter(&self) -> &BloomFilter {
        &self.filter
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Consume the service, returning its sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn emit(&mut self, line: &str) -> Result<(), CacheError> {
        self.sink.record(line)?;
        self.metrics.record_trace_line();
        Ok(())
    }
}

impl<S: TraceSink> MembershipApi for UrlCacheService<S> {
    fn add(&mut self, item: &str) -> Result<(), CacheError> {
        let item = item.trim();

        let start = Instant::now();
        self.filter.insert(item.as_bytes());
        self.metrics.record_insert(start.elapsed());
        trace!(item, "added");

        self.emit(&added_line(item))
    }

    fn contains(&mut self, item: &str) -> Result<bool, CacheError> {
        let item = item.trim();

        let start = Instant::now();
        let exists = self.filter.contains(item.as_bytes());
        self.metrics.record_lookup(start.elapsed(), exists);
        trace!(item, exists, "checked");

        self.emit(&existence_line(item, exists))?;
        Ok(exists)
    }
}
