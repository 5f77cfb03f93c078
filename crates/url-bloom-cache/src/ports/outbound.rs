//! Outbound Ports (Driven Ports)
//!
//! The cache's only external resource is an append-only line sink that
//! receives one trace line per operation.

use std::io;

/// Append-only trace sink (Driven Port)
pub trait TraceSink {
    /// Append `line` followed by a newline
    fn record(&mut self, line: &str) -> io::Result<()>;
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn record(&mut self, line: &str) -> io::Result<()> {
        (**self).record(line)
    }
}

impl<S: TraceSink + ?Sized> TraceSink for Box<S> {
    fn record(&mut self, line: &str) -> io::Result<()> {
        (**self).record(line)
    }
}
