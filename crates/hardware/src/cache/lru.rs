//! Least Recently Used (LRU) bookkeeping for one cache set.
//!
//! Recency is a per-set logical clock stored in each line: an access stamps the
//! line with one more than the largest stamp in its set, and the victim is the
//! line with the smallest stamp. A single linear pass over the set gathers
//! everything the access engine needs.
//!
//! # Performance
//!
//! - **Time Complexity:** O(E) per access, where E is the associativity
//! - **Space Complexity:** one `u64` stamp per line
//! - **Best Case:** small associativity, which is what trace-driven cache labs use
//! - **Worst Case:** very wide sets, where a recency-ordered list would scale better

use super::CacheLine;

/// Everything learned from one pass over a set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetScan {
    /// Way holding a valid line with the requested tag, if any.
    pub hit_way: Option<usize>,
    /// First way holding an invalid line, if any.
    pub empty_way: Option<usize>,
    /// Way with the smallest recency stamp; ties go to the lowest way.
    pub lru_way: usize,
    /// Largest recency stamp in the set.
    pub max_recency: u64,
}

impl SetScan {
    /// Scans `lines` (one whole set) for `tag`.
    ///
    /// # Arguments
    ///
    /// * `lines` - The lines of the target set; must not be empty.
    /// * `tag` - The tag being looked up.
    pub fn new(lines: &[CacheLine], tag: u64) -> Self {
        let mut scan = Self {
            hit_way: None,
            empty_way: None,
            lru_way: 0,
            max_recency: 0,
        };
        let mut min_recency = u64::MAX;

        for (way, line) in lines.iter().enumerate() {
            // Strict comparison keeps the first way among equal stamps.
            if line.recency < min_recency {
                min_recency = line.recency;
                scan.lru_way = way;
            }
            scan.max_recency = scan.max_recency.max(line.recency);

            if line.valid {
                if scan.hit_way.is_none() && line.tag == tag {
                    scan.hit_way = Some(way);
                }
            } else if scan.empty_way.is_none() {
                scan.empty_way = Some(way);
            }
        }
        scan
    }

    /// Stamp to give the line touched by this access.
    #[inline]
    pub const fn next_recency(&self) -> u64 {
        self.max_recency + 1
    }
}
