use std::io::Write;

use csim_core::cache::AccessResult;
use csim_core::config::Geometry;
use csim_core::sim::RecordOutcome;
use csim_core::{SimStats, Simulator, TraceReader};
use tempfile::NamedTempFile;

pub struct TestContext {
    pub sim: Simulator,
    pub geometry: Geometry,
}

impl TestContext {
    /// Builds a simulator for an `(s, E, b)` geometry.
    pub fn new(s: u32, e: usize, b: u32) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("csim_core=trace")
            .try_init();

        let geometry = Geometry::new(s, e, b).unwrap();
        let sim = Simulator::new(geometry).unwrap();
        Self { sim, geometry }
    }

    /// Composes an address from its tag, set index and block offset.
    pub fn addr(&self, tag: u64, set: u64, offset: u64) -> u64 {
        let b = self.geometry.block_offset_bits();
        let s = self.geometry.set_index_bits();
        (tag << (s + b)) | (set << b) | offset
    }

    /// Accesses the block with `tag` in set `set`.
    pub fn touch(&mut self, tag: u64, set: u64) -> AccessResult {
        let addr = self.addr(tag, set, 0);
        self.sim.access(addr)
    }

    /// Replays trace text and returns every record's outcome.
    pub fn replay(&mut self, trace: &str) -> Vec<RecordOutcome> {
        let mut reader = TraceReader::new(trace.as_bytes());
        let mut outcomes = Vec::new();
        self.sim
            .replay(&mut reader, |_, outcome| outcomes.push(*outcome))
            .unwrap();
        outcomes
    }

    pub fn stats(&self) -> SimStats {
        *self.sim.stats()
    }
}

/// Writes `contents` to a temporary trace file.
pub fn temp_trace(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// The classic cache-lab `yi.trace`.
pub const YI_TRACE: &str = " L 10,1
 M 20,1
 L 22,1
 S 18,1
 L 110,1
 L 210,1
 M 12,1
";
