//! In-memory trace sink

use std::io;

use crate::ports::TraceSink;

/// Trace sink collecting lines in memory
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryTraceSink {
    lines: Vec<String>,
}

impl MemoryTraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines recorded so far, without their newline
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Recorded lines joined as they would appear in a file
    pub fn contents(&self) -> String {
        self.lines.iter().map(|line| format!("{line}\n")).collect()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl TraceSink for MemoryTraceSink {
    fn record(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.trim_end_matches('\n').to_string());
        Ok(())
    }
}
