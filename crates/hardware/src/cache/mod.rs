//! Set-Associative Cache Model.
//!
//! This module implements the cache state and the per-access lookup and
//! replacement algorithm. The cache holds `2^s` sets of `E` lines in a single
//! flat arena indexed by `set * E + way`; each line tracks validity, a tag and
//! an LRU recency stamp. Every access is classified as a hit or a miss, and a
//! miss into a full set evicts the least recently used line.

/// LRU bookkeeping: the single-pass set scan.
pub mod lru;

use std::fmt;

use tracing::trace;

use self::lru::SetScan;
use crate::common::addr::DecodedAddr;
use crate::common::error::SimError;
use crate::config::Geometry;
use crate::stats::SimStats;

/// One storage slot of a set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Whether the slot holds a block; an invalid line's tag and recency are meaningless.
    pub valid: bool,
    /// Tag of the resident block.
    pub tag: u64,
    /// LRU stamp; larger means more recently used.
    pub recency: u64,
}

/// Whether an access found its block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    /// The block was resident.
    Hit,
    /// The block had to be installed.
    Miss,
}

/// Outcome of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessResult {
    /// Hit or miss.
    pub kind: AccessKind,
    /// Whether a valid line was displaced; only ever set on a miss.
    pub evicted: bool,
}

impl AccessResult {
    /// A hit.
    pub const HIT: Self = Self {
        kind: AccessKind::Hit,
        evicted: false,
    };
    /// A miss that filled an empty line.
    pub const MISS: Self = Self {
        kind: AccessKind::Miss,
        evicted: false,
    };
    /// A miss that replaced the LRU line.
    pub const MISS_EVICTION: Self = Self {
        kind: AccessKind::Miss,
        evicted: true,
    };

    /// Returns `true` for a hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.kind == AccessKind::Hit
    }
}

impl fmt::Display for AccessResult {
    /// Formats the outcome the way verbose traces print it: `hit`, `miss` or `miss eviction`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.evicted) {
            (AccessKind::Hit, _) => f.write_str("hit"),
            (AccessKind::Miss, false) => f.write_str("miss"),
            (AccessKind::Miss, true) => f.write_str("miss eviction"),
        }
    }
}

/// Cache state: `2^s` sets of `E` lines with LRU replacement.
#[derive(Debug, Clone)]
pub struct Cache {
    geometry: Geometry,
    lines: Vec<CacheLine>,
}

impl Cache {
    /// Allocates a cache for `geometry` with every line invalid, tag 0, recency 0.
    ///
    /// # Errors
    ///
    /// [`SimError::Allocation`] if `2^s * E` lines cannot be represented or the
    /// allocator refuses the request. No partially built cache is returned.
    pub fn new(geometry: Geometry) -> Result<Self, SimError> {
        let alloc_error = || SimError::Allocation {
            set_index_bits: geometry.set_index_bits(),
            lines_per_set: geometry.lines_per_set(),
        };

        let total = geometry
            .checked_set_count()
            .and_then(|sets| sets.checked_mul(geometry.lines_per_set()))
            .ok_or_else(alloc_error)?;

        let mut lines = Vec::new();
        lines.try_reserve_exact(total).map_err(|_| alloc_error())?;
        lines.resize(total, CacheLine::default());

        Ok(Self { geometry, lines })
    }

    /// The geometry this cache was built with.
    #[inline]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Lines of set `index`, or `None` if the set does not exist.
    pub fn set(&self, index: usize) -> Option<&[CacheLine]> {
        let ways = self.geometry.lines_per_set();
        let base = index.checked_mul(ways)?;
        self.lines.get(base..base.checked_add(ways)?)
    }

    /// Number of valid lines in set `index` (0 for a set that does not exist).
    pub fn valid_lines(&self, index: usize) -> usize {
        self.set(index)
            .map_or(0, |lines| lines.iter().filter(|line| line.valid).count())
    }

    /// Checks whether the block holding `addr` is resident, without touching LRU state.
    pub fn contains(&self, addr: u64) -> bool {
        let decoded = DecodedAddr::new(addr, &self.geometry);
        self.set(decoded.set).is_some_and(|lines| {
            lines
                .iter()
                .any(|line| line.valid && line.tag == decoded.tag)
        })
    }

    /// Accesses the block holding `addr` and records the outcome in `stats`.
    ///
    /// On a hit the line becomes the most recently used. On a miss the block is
    /// installed in the first invalid line of its set or, if the set is full, in
    /// place of the least recently used line (lowest way on ties), counting an
    /// eviction.
    ///
    /// The block offset is ignored: one call models one access that does not
    /// straddle a block boundary.
    ///
    /// # Arguments
    ///
    /// * `addr` - The data address being accessed.
    /// * `stats` - Counters for the current run.
    ///
    /// # Returns
    ///
    /// Whether the access hit and whether it evicted a line.
    pub fn access(&mut self, addr: u64, stats: &mut SimStats) -> AccessResult {
        let decoded = DecodedAddr::new(addr, &self.geometry);
        let ways = self.geometry.lines_per_set();
        let base = decoded.set * ways;
        let set = &mut self.lines[base..base + ways];

        let scan = SetScan::new(set, decoded.tag);
        let stamp = scan.next_recency();

        let result = if let Some(way) = scan.hit_way {
            set[way].recency = stamp;
            AccessResult::HIT
        } else if let Some(way) = scan.empty_way {
            set[way] = CacheLine {
                valid: true,
                tag: decoded.tag,
                recency: stamp,
            };
            AccessResult::MISS
        } else {
            let victim = &mut set[scan.lru_way];
            victim.tag = decoded.tag;
            victim.recency = stamp;
            AccessResult::MISS_EVICTION
        };

        stats.record(result);
        trace!(addr, set = decoded.set, tag = decoded.tag, %result, "cache access");
        result
    }
}
