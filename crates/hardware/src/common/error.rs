//! Error definitions.
//!
//! This module defines the failures a simulation run can hit. It provides:
//! 1. **Configuration errors:** missing or inconsistent geometry, missing trace, bad config files.
//! 2. **Run errors:** unreadable trace input and cache allocation failure.
//!
//! Malformed trace lines are not errors: the trace reader skips and counts them.
//! Every variant here is fatal for the run that raised it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid or incomplete simulator configuration.
///
/// Raised before any cache is built; the run never starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required parameter was not supplied, or was supplied as zero.
    ///
    /// The associated value is the command-line flag naming the parameter (`s`, `E`, `b`).
    #[error("missing required command line argument: -{0}")]
    MissingArgument(&'static str),

    /// No trace file was designated.
    #[error("missing required command line argument: -t <file>")]
    MissingTrace,

    /// The set had no lines to hold a block.
    #[error("lines per set (E) must be at least 1")]
    ZeroAssociativity,

    /// Set-index and block-offset fields do not fit in a 64-bit address.
    #[error(
        "set index bits ({set_index_bits}) + block offset bits ({block_offset_bits}) exceed the 64-bit address"
    )]
    AddressOverflow {
        /// Requested set-index width.
        set_index_bits: u32,
        /// Requested block-offset width.
        block_offset_bits: u32,
    },

    /// The geometry file could not be read.
    #[error("cannot read config file {}: {source}", path.display())]
    ConfigUnreadable {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The geometry file is not valid JSON for a geometry.
    #[error("invalid config file {}: {source}", path.display())]
    ConfigInvalid {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Fatal failure of a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The trace source could not be opened or read.
    #[error("{}: {source}", path.display())]
    InputUnavailable {
        /// Path of the trace file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A report file could not be written.
    #[error("cannot write {}: {source}", path.display())]
    OutputFailed {
        /// Path of the report file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Storage for the cache could not be obtained.
    #[error("cannot allocate cache storage for 2^{set_index_bits} sets of {lines_per_set} lines")]
    Allocation {
        /// Set-index width of the rejected geometry.
        set_index_bits: u32,
        /// Associativity of the rejected geometry.
        lines_per_set: usize,
    },
}
