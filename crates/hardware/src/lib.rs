//! Trace-driven cache simulator library.
//!
//! This crate replays valgrind-style memory traces against a set-associative
//! cache with LRU replacement and counts hits, misses and evictions:
//! 1. **Cache:** Flat set/line storage, address decomposition, and the LRU access engine.
//! 2. **Trace:** Line classification and a reader that yields data records only.
//! 3. **Simulation:** A driver dispatching loads, stores and modifies to the cache.
//! 4. **Configuration:** The `(s, E, b)` geometry, from code, JSON or the command line.
//! 5. **Statistics:** Counters and end-of-run reporting.
//!
//! ```
//! use csim_core::{Geometry, Simulator, TraceReader};
//!
//! let trace = " L 10,1\n M 20,1\n L 22,1\n S 18,1\n L 110,1\n L 210,1\n M 12,1\n";
//! let mut sim = Simulator::new(Geometry::new(4, 1, 4).unwrap()).unwrap();
//! sim.replay(&mut TraceReader::new(trace.as_bytes()), |_, _| {}).unwrap();
//! assert_eq!(sim.finish().summary(), "hits:4 misses:5 evictions:3");
//! ```

/// Common types (address decomposition, errors).
pub mod common;
/// Cache geometry and its JSON/command-line configuration.
pub mod config;
/// Cache state and the LRU access engine.
pub mod cache;
/// Simulation driver.
pub mod sim;
/// Hit/miss/eviction counters and reporting.
pub mod stats;
/// Trace parsing and reading.
pub mod trace;

/// Cache state; build with `Cache::new`.
pub use crate::cache::Cache;
/// Errors surfaced by configuration and runs.
pub use crate::common::{ConfigError, SimError};
/// Validated cache geometry.
pub use crate::config::Geometry;
/// Simulation driver owning a cache and its counters.
pub use crate::sim::Simulator;
/// Run counters.
pub use crate::stats::SimStats;
/// Trace reader yielding data records.
pub use crate::trace::TraceReader;
