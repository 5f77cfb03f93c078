//! Operation counters for the cache service
//!
//! The service owns its metrics exclusively, so plain counters suffice.
//!
//! ```
//! use std::time::Duration;
//! use url_bloom_cache::metrics::Metrics;
//!
//! let mut metrics = Metrics::new();
//! metrics.record_insert(Duration::from_nanos(120));
//! metrics.record_lookup(Duration::from_nanos(80), true);
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.elements_inserted, 1);
//! assert_eq!(snapshot.lookups_positive, 1);
//! ```

use std::time::Duration;

/// Call count and cumulative time of one kind of operation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpTimer {
    pub calls: u64,
    pub total: Duration,
}

impl OpTimer {
    fn record(&mut self, elapsed: Duration) {
        self.calls += 1;
        self.total += elapsed;
    }

    /// Mean duration per call, zero before the first call
    pub fn mean(&self) -> Duration {
        match u32::try_from(self.calls) {
            Ok(0) => Duration::ZERO,
            Ok(calls) => self.total / calls,
            Err(_) => Duration::from_nanos((self.total.as_nanos() / self.calls as u128) as u64),
        }
    }
}

/// Counters kept by [`UrlCacheService`](crate::UrlCacheService)
#[derive(Clone, Debug, Default)]
pub struct Metrics {
    inserts: OpTimer,
    lookups: OpTimer,
    positives: u64,
    trace_lines: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_insert(&mut self, elapsed: Duration) {
        self.inserts.record(elapsed);
    }

    /// Record a lookup; `found` counts false positives too
    pub fn record_lookup(&mut self, elapsed: Duration, found: bool) {
        self.lookups.record(elapsed);
        if found {
            self.positives += 1;
        }
    }

    pub fn record_trace_line(&mut self) {
        self.trace_lines += 1;
    }

    pub fn inserts(&self) -> OpTimer {
        self.inserts
    }

    pub fn lookups(&self) -> OpTimer {
        self.lookups
    }

    /// Share of lookups answered "possibly present"
    pub fn observed_positive_rate(&self) -> f64 {
        if self.lookups.calls == 0 {
            return 0.0;
        }
        self.positives as f64 / self.lookups.calls as f64
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            elements_inserted: self.inserts.calls,
            lookups_performed: self.lookups.calls,
            lookups_positive: self.positives,
            trace_lines: self.trace_lines,
            avg_insert_ns: self.inserts.mean().as_nanos() as u64,
            avg_lookup_ns: self.lookups.mean().as_nanos() as u64,
        }
    }
}

/// Point-in-time copy of the counters
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub elements_inserted: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub trace_lines: u64,
    pub avg_insert_ns: u64,
    pub avg_lookup_ns: u64,
}
