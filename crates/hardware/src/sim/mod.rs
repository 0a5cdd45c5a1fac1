//! Simulation driver.
//!
//! Ties a cache and its counters together and feeds trace records through them.

/// The simulator and per-record outcomes.
pub mod simulator;

pub use simulator::{RecordOutcome, Simulator};
