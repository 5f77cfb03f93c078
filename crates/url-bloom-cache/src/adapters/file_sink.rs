//! Append-mode file sink
//!
//! Every record is written as one newline-terminated line and flushed before
//! `record` returns, so the file is complete even if the process stops right
//! after. The file handle is closed when the sink is dropped.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ports::TraceSink;

/// Trace sink appending to a file
#[derive(Debug)]
pub struct FileTraceSink {
    file: File,
    path: PathBuf,
}

impl FileTraceSink {
    /// Open `path` for appending, creating it if needed
    ///
    /// Existing content is kept.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        debug!(path = %path.display(), "opened trace sink");
        Ok(Self { file, path })
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TraceSink for FileTraceSink {
    fn record(&mut self, line: &str) -> io::Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        if !line.ends_with('\n') {
            buf.push('\n');
        }
        self.file.write_all(buf.as_bytes())?;
        self.file.flush()
    }
}
