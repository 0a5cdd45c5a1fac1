//! Memory-access traces.
//!
//! This module turns valgrind-style trace text into data records. It provides:
//! 1. **Classification:** an explicit decision table from a line to data, instruction, blank or malformed.
//! 2. **Reading:** an iterator over the data records of a file or any buffered reader.

/// Line reader that filters a trace down to its data records.
pub mod reader;

/// Record types and line classification.
pub mod record;

pub use reader::TraceReader;
pub use record::{LineClass, Operation, TraceRecord, classify_line};
