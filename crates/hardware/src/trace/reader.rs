//! Line-by-line trace reader.
//!
//! Wraps any [`BufRead`] and yields only the data records the cache should
//! see. Instruction fetches, blank lines and malformed lines are skipped and
//! counted. Read failures are fatal and surface as
//! [`SimError::InputUnavailable`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::record::{LineClass, TraceRecord, classify_line};
use crate::common::error::SimError;

/// Iterator over the data records of a trace.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    source: PathBuf,
    buf: Vec<u8>,
    line_no: u64,
    instructions: u64,
    malformed: u64,
    failed: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens the trace file at `path`.
    ///
    /// # Errors
    ///
    /// [`SimError::InputUnavailable`] if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, SimError> {
        let file = File::open(path).map_err(|source| SimError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::with_source(BufReader::new(file), path))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Reads a trace from an in-memory or already-open source.
    pub fn new(reader: R) -> Self {
        Self::with_source(reader, Path::new("<input>"))
    }

    /// Reads a trace from `reader`, naming it `source` in errors and logs.
    pub fn with_source(reader: R, source: &Path) -> Self {
        Self {
            reader,
            source: source.to_path_buf(),
            buf: Vec::new(),
            line_no: 0,
            instructions: 0,
            malformed: 0,
            failed: false,
        }
    }

    /// Lines consumed so far.
    pub const fn lines_read(&self) -> u64 {
        self.line_no
    }

    /// Instruction-fetch records skipped so far.
    pub const fn instructions_skipped(&self) -> u64 {
        self.instructions
    }

    /// Malformed lines skipped so far.
    pub const fn malformed_skipped(&self) -> u64 {
        self.malformed
    }

    /// Name of the trace source.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(source) => {
                    self.failed = true;
                    return Some(Err(SimError::InputUnavailable {
                        path: self.source.clone(),
                        source,
                    }));
                }
            }
            self.line_no += 1;

            let class = std::str::from_utf8(&self.buf).map_or(LineClass::Malformed, classify_line);
            match class {
                LineClass::Data(record) => return Some(Ok(record)),
                LineClass::Instruction => self.instructions += 1,
                LineClass::Blank => {}
                LineClass::Malformed => {
                    self.malformed += 1;
                    debug!(
                        source = %self.source.display(),
                        line = self.line_no,
                        "skipping malformed trace line"
                    );
                }
            }
        }
    }
}
