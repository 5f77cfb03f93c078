//! Error types for the URL Bloom cache

use std::io;

use thiserror::Error;

/// Errors raised while building or combining filters
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid filter size: {size} bits (must be greater than 0)")]
    InvalidSize { size: usize },

    #[error("Invalid hash count: {count} (must be between {min} and {max})")]
    InvalidHashCount { count: usize, min: usize, max: usize },

    #[error("Hash bank must contain at least one hash function")]
    EmptyHashBank,

    #[error("Incompatible filters: {0}")]
    IncompatibleFilters(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors from parsing a command line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Missing payload separator in command line: {line:?}")]
    MissingPayload { line: String },
}

/// Errors surfaced by the cache service
///
/// `add` and `contains` on the filter itself are total; the runtime failures
/// are the trace sink refusing a write and the command input failing to read.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Trace sink error: {0}")]
    Sink(#[from] io::Error),

    #[error("Failed to read command input: {0}")]
    Input(#[source] io::Error),
}
