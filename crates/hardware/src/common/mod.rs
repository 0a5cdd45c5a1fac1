//! Common types shared by the cache model and the trace front end.
//!
//! This module provides:
//! 1. **Address decomposition:** splitting a data address into offset, set index and tag.
//! 2. **Error handling:** configuration and run-time error enums.

/// Address decomposition into block offset, set index and tag.
pub mod addr;

/// Error types for configuration and simulation runs.
pub mod error;

pub use addr::DecodedAddr;
pub use error::{ConfigError, SimError};
