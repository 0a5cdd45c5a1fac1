//! Configuration system for the cache simulator.
//!
//! This module defines the cache geometry and how it is assembled. It provides:
//! 1. **Geometry:** The validated, immutable `(s, E, b)` triple the cache is built from.
//! 2. **Geometry config:** A partially-filled form of the triple, deserializable from JSON
//!    and mergeable with command-line values.
//! 3. **Validation:** The "every parameter supplied and non-zero" rule for user input.
//!
//! A geometry file looks like this (the short cache-lab names are accepted as aliases):
//!
//! ```
//! use csim_core::config::GeometryConfig;
//!
//! let json = r#"{ "set_index_bits": 4, "E": 2, "block_offset_bits": 4 }"#;
//! let config: GeometryConfig = serde_json::from_str(json).unwrap();
//! let geometry = config.resolve().unwrap();
//! assert_eq!(geometry.set_count(), 16);
//! assert_eq!(geometry.lines_per_set(), 2);
//! assert_eq!(geometry.block_bytes(), 16);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::addr::ADDRESS_BITS;
use crate::common::error::ConfigError;

/// Cache geometry: set-index bits, lines per set and block-offset bits.
///
/// Constructed through [`Geometry::new`], which guarantees `lines_per_set >= 1`
/// and `set_index_bits + block_offset_bits <= 64`. Zero-width set index or block
/// offset fields are valid here (a single set, one-byte blocks); the stricter
/// user-facing rule lives in [`GeometryConfig::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    set_index_bits: u32,
    lines_per_set: usize,
    block_offset_bits: u32,
}

impl Geometry {
    /// Creates a geometry after checking it describes a usable cache.
    ///
    /// # Arguments
    ///
    /// * `set_index_bits` - `s`, number of set-index bits (`2^s` sets).
    /// * `lines_per_set` - `E`, associativity.
    /// * `block_offset_bits` - `b`, number of block-offset bits (`2^b` bytes per block).
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroAssociativity`] if `lines_per_set` is 0, and
    /// [`ConfigError::AddressOverflow`] if `s + b` exceeds 64.
    pub fn new(
        set_index_bits: u32,
        lines_per_set: usize,
        block_offset_bits: u32,
    ) -> Result<Self, ConfigError> {
        if lines_per_set == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        let too_wide = set_index_bits
            .checked_add(block_offset_bits)
            .is_none_or(|bits| bits > ADDRESS_BITS);
        if too_wide {
            return Err(ConfigError::AddressOverflow {
                set_index_bits,
                block_offset_bits,
            });
        }
        Ok(Self {
            set_index_bits,
            lines_per_set,
            block_offset_bits,
        })
    }

    /// Number of set-index bits (`s`).
    #[inline]
    pub const fn set_index_bits(&self) -> u32 {
        self.set_index_bits
    }

    /// Number of lines in every set (`E`).
    #[inline]
    pub const fn lines_per_set(&self) -> usize {
        self.lines_per_set
    }

    /// Number of block-offset bits (`b`).
    #[inline]
    pub const fn block_offset_bits(&self) -> u32 {
        self.block_offset_bits
    }

    /// Number of sets, `2^s`, or `None` if it does not fit in `usize`.
    pub const fn checked_set_count(&self) -> Option<usize> {
        1usize.checked_shl(self.set_index_bits)
    }

    /// Number of sets, `2^s`.
    ///
    /// Saturates at `usize::MAX` for geometries too large to allocate; such a
    /// geometry is rejected by [`Cache::new`](crate::cache::Cache::new).
    pub const fn set_count(&self) -> usize {
        match self.checked_set_count() {
            Some(n) => n,
            None => usize::MAX,
        }
    }

    /// Block size in bytes, `2^b`, saturating at `u64::MAX` when `b == 64`.
    pub const fn block_bytes(&self) -> u64 {
        match 1u64.checked_shl(self.block_offset_bits) {
            Some(n) => n,
            None => u64::MAX,
        }
    }
}

/// Partially specified geometry, as read from a config file or the command line.
///
/// Every field is optional so that a file can supply defaults and flags can
/// override them; [`GeometryConfig::resolve`] turns the result into a [`Geometry`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeometryConfig {
    /// Set-index bits (`s`).
    #[serde(default, alias = "s")]
    pub set_index_bits: Option<u32>,
    /// Lines per set (`E`).
    #[serde(default, alias = "E")]
    pub lines_per_set: Option<usize>,
    /// Block-offset bits (`b`).
    #[serde(default, alias = "b")]
    pub block_offset_bits: Option<u32>,
}

impl GeometryConfig {
    /// Loads a geometry config from a JSON file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ConfigUnreadable`] when the file cannot be read and
    /// [`ConfigError::ConfigInvalid`] when its contents do not parse.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ConfigUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::ConfigInvalid {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns `self` with every field set in `overrides` replaced.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            set_index_bits: overrides.set_index_bits.or(self.set_index_bits),
            lines_per_set: overrides.lines_per_set.or(self.lines_per_set),
            block_offset_bits: overrides.block_offset_bits.or(self.block_offset_bits),
        }
    }

    /// Validates the config into a [`Geometry`].
    ///
    /// A parameter that is absent or zero counts as "not configured", matching
    /// the command-line contract of the cache-lab tools.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingArgument`] naming the first missing parameter, or any
    /// error from [`Geometry::new`].
    pub fn resolve(&self) -> Result<Geometry, ConfigError> {
        let s = self
            .set_index_bits
            .filter(|&v| v != 0)
            .ok_or(ConfigError::MissingArgument("s"))?;
        let e = self
            .lines_per_set
            .filter(|&v| v != 0)
            .ok_or(ConfigError::MissingArgument("E"))?;
        let b = self
            .block_offset_bits
            .filter(|&v| v != 0)
            .ok_or(ConfigError::MissingArgument("b"))?;
        Geometry::new(s, e, b)
    }
}
