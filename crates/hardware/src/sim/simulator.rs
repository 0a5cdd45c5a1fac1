//! Simulator: owns the cache and the run's counters side by side.
//!
//! Records are dispatched by operation: loads and stores access the cache once,
//! modifies access it twice at the same address (read, then write back).

use std::fmt;
use std::io::BufRead;

use tracing::info;

use crate::cache::{AccessResult, Cache};
use crate::common::error::SimError;
use crate::config::Geometry;
use crate::stats::SimStats;
use crate::trace::{Operation, TraceReader, TraceRecord};

/// Cache outcomes produced by one trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Result of the first (or only) access.
    pub first: AccessResult,
    /// Result of the store half of a modify.
    pub second: Option<AccessResult>,
}

impl RecordOutcome {
    /// All access results of the record, in order.
    pub fn results(&self) -> impl Iterator<Item = AccessResult> {
        std::iter::once(self.first).chain(self.second)
    }
}

impl fmt::Display for RecordOutcome {
    /// Formats as the space-separated outcomes, e.g. `miss eviction hit`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        if let Some(second) = self.second {
            write!(f, " {second}")?;
        }
        Ok(())
    }
}

/// Top-level simulator: cache state plus hit/miss/eviction counters.
///
/// Each instance is independent; several can run in the same process.
#[derive(Debug, Clone)]
pub struct Simulator {
    cache: Cache,
    stats: SimStats,
}

impl Simulator {
    /// Creates a simulator with an empty cache of the given geometry.
    ///
    /// # Errors
    ///
    /// [`SimError::Allocation`] if the cache storage cannot be obtained.
    pub fn new(geometry: Geometry) -> Result<Self, SimError> {
        Ok(Self {
            cache: Cache::new(geometry)?,
            stats: SimStats::default(),
        })
    }

    /// Performs a single cache access.
    pub fn access(&mut self, addr: u64) -> AccessResult {
        self.cache.access(addr, &mut self.stats)
    }

    /// Applies one data record to the cache.
    pub fn apply(&mut self, record: &TraceRecord) -> RecordOutcome {
        let first = self.access(record.addr);
        let second = match record.op {
            Operation::Load | Operation::Store => None,
            Operation::Modify => Some(self.access(record.addr)),
        };
        RecordOutcome { first, second }
    }

    /// Replays every data record from `reader`.
    ///
    /// `observe` is called after each record with the record and its outcome,
    /// which is how the command line prints verbose traces.
    ///
    /// # Errors
    ///
    /// Stops at the first read failure. Counters keep whatever was accumulated
    /// before it; callers treat the run as aborted.
    ///
    /// # Returns
    ///
    /// The number of data records applied.
    pub fn replay<R, F>(&mut self, reader: &mut TraceReader<R>, mut observe: F) -> Result<u64, SimError>
    where
        R: BufRead,
        F: FnMut(&TraceRecord, &RecordOutcome),
    {
        info!(
            source = %reader.source().display(),
            s = self.cache.geometry().set_index_bits(),
            E = self.cache.geometry().lines_per_set(),
            b = self.cache.geometry().block_offset_bits(),
            "replaying trace"
        );

        let mut records = 0;
        for record in reader.by_ref() {
            let record = record?;
            let outcome = self.apply(&record);
            observe(&record, &outcome);
            records += 1;
        }

        info!(
            records,
            lines = reader.lines_read(),
            instructions_skipped = reader.instructions_skipped(),
            malformed_skipped = reader.malformed_skipped(),
            "trace finished"
        );
        Ok(records)
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// The cache state.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Ends the run, releasing the cache and returning the final counters.
    pub fn finish(self) -> SimStats {
        self.stats
    }
}
