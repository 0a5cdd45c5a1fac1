//! # Unit Tests
//!
//! Organized by layer, bottom-up: address decomposition and geometry, the LRU
//! set scan, the cache access engine, trace classification and reading, the
//! simulator driver, statistics, and randomized invariant checks.

/// Address decomposition into offset, set index and tag.
pub mod addr;



/// Single-pass LRU set scan.
pub mod lru;



/// Counters and reporting.
pub mod stats;
