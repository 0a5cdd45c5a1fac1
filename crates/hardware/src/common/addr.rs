//! Address decomposition.
//!
//! This module splits a 64-bit data address into the three fields a
//! set-associative cache cares about. From the least-significant bit upward:
//! 1. **Block offset:** `b` bits selecting a byte inside the block (ignored by the cache model).
//! 2. **Set index:** the next `s` bits, selecting one of `2^s` sets.
//! 3. **Tag:** every remaining high-order bit, identifying the block within its set.
//!
//! The geometry guarantees `s + b <= 64`, so every shift here is well defined;
//! the boundary widths (0 and 64) are handled with checked shifts instead of
//! relying on the hardware's shift-amount masking.

use crate::config::Geometry;

/// Number of address bits the simulator models.
pub const ADDRESS_BITS: u32 = 64;

/// An address split into block offset, set index and tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddr {
    /// Byte offset inside the block.
    pub offset: u64,
    /// Index of the set the address maps to, always `< geometry.set_count()`.
    pub set: usize,
    /// High-order bits stored in the line to identify the block.
    pub tag: u64,
}

impl DecodedAddr {
    /// Decomposes `addr` according to `geometry`.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw 64-bit data address.
    /// * `geometry` - Cache geometry supplying the offset and set-index widths.
    ///
    /// # Returns
    ///
    /// The decoded offset, set index and tag.
    #[inline]
    pub fn new(addr: u64, geometry: &Geometry) -> Self {
        let b = geometry.block_offset_bits();
        let s = geometry.set_index_bits();

        let offset = addr & low_mask(b);
        let set = shr(addr, b) & low_mask(s);
        let tag = shr(addr, s + b);

        Self {
            offset,
            set: set as usize,
            tag,
        }
    }
}

/// Mask selecting the lowest `bits` bits; `bits == 64` selects everything.
#[inline]
const fn low_mask(bits: u32) -> u64 {
    if bits >= ADDRESS_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Logical right shift that yields 0 once every bit has been shifted out.
#[inline]
fn shr(value: u64, bits: u32) -> u64 {
    value.checked_shr(bits).unwrap_or(0)
}
