//! Command Handler
//!
//! Reads command lines one at a time and dispatches them to a
//! [`MembershipApi`]. Each line is fully processed before the next is read.
//!
//! - Blank lines and unrecognized verbs are skipped silently
//! - Malformed lines, including invalid UTF-8, are logged and skipped
//! - Sink or read failures abort the run

use std::io::BufRead;

use tracing::{debug, warn};

use crate::error::CacheError;
use crate::events::Command;
use crate::ports::MembershipApi;

/// Result of dispatching a single command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Added,
    Checked { exists: bool },
}

/// Counts for one pass over a command stream
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines read
    pub lines: usize,
    /// ADD commands processed
    pub added: usize,
    /// CONTAINS commands processed
    pub checked: usize,
    /// CONTAINS commands answered "possibly present"
    pub positives: usize,
    /// Blank lines and unrecognized verbs
    pub ignored: usize,
    /// Lines without a verb/payload separator
    pub malformed: usize,
}

/// Dispatches commands to a membership API
#[derive(Debug, Default)]
pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    /// Apply one command
    pub fn dispatch<A: MembershipApi + ?Sized>(
        &self,
        command: &Command,
        api: &mut A,
    ) -> Result<Outcome, CacheError> {
        match command {
            Command::Add(item) => {
                api.add(item)?;
                Ok(Outcome::Added)
            }
            Command::Contains(item) => {
                let exists = api.contains(item)?;
                Ok(Outcome::Checked { exists })
            }
        }
    }

    /// Process every line of `reader`
    ///
    /// Lines that are not valid UTF-8 are skipped as malformed; only a failing
    /// read aborts the run.
    pub fn run<R: BufRead, A: MembershipApi + ?Sized>(
        &self,
        mut reader: R,
        api: &mut A,
    ) -> Result<RunSummary, CacheError> {
        let mut summary = RunSummary::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader
                .read_until(b'\n', &mut buf)
                .map_err(CacheError::Input)?
                == 0
            {
                break;
            }
            summary.lines += 1;
            let line_no = summary.lines;

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    warn!(line = line_no, error = %e, "skipping line that is not valid UTF-8");
                    summary.malformed += 1;
                    continue;
                }
            };

            let command = match Command::parse(line) {
                Ok(Some(command)) => command,
                Ok(None) => {
                    debug!(line = line_no, "skipping line");
                    summary.ignored += 1;
                    continue;
                }
                Err(e) => {
                    warn!(line = line_no, error = %e, "skipping malformed command");
                    summary.malformed += 1;
                    continue;
                }
            };

            match self.dispatch(&command, api)? {
                Outcome::Added => summary.added += 1,
                Outcome::Checked { exists } => {
                    summary.checked += 1;
                    if exists {
                        summary.positives += 1;
                    }
                }
            }
        }

        Ok(summary)
    }
}
