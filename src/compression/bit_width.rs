//! Position-dependent split of a 16-bit copy token.
//!
//! Early in a chunk only short back-references are possible, so few bits go
//! to the offset and the rest to the length. Every time the position crosses
//! a power of two one bit moves from the length field to the offset field:
//!
//! ```text
//! Position      Length bits  Max length  Offset bits
//! ===================================================
//!    1 - 16         12          4098          4
//!   17 - 32         11          2050          5
//!   33 - 64         10          1026          6
//!   65 - 128         9           514          7
//!  129 - 256         8           258          8
//!  257 - 512         7           130          9
//!  513 - 1024        6            66         10
//! 1025 - 2048        5            34         11
//! 2049 - 4096        4            18         12
//! ```

use once_cell::sync::Lazy;

use crate::error::{OvbaError, Result};

use super::constants::copy_token::{MAX_OFFSET_BITS, MIN_OFFSET_BITS, TOKEN_BITS};
use super::constants::{MAX_BYTES_PER_CHUNK, MIN_MATCH_LENGTH};

/// Every position a chunk can produce, precomputed.
static TABLE: Lazy<Vec<BitWidth>> = Lazy::new(|| {
    (0..=MAX_BYTES_PER_CHUNK)
        .map(|position| BitWidth::from_offset_bits(raw_bit_count(position).max(MIN_OFFSET_BITS)))
        .collect()
});

/// Smallest `n` with `2^n >= position`, stopping one past the upper limit.
fn raw_bit_count(position: usize) -> u32 {
    let mut bit_count = 0u32;
    while bit_count <= MAX_OFFSET_BITS && (1usize << bit_count) < position {
        bit_count += 1;
    }
    bit_count
}

/// Offset/length bit allocation for a copy token at one chunk position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitWidth {
    offset_bit_count: u32,
    length_mask: u16,
    offset_mask: u16,
    maximum_length: u16,
}

impl BitWidth {
    /// Compute the split for a chunk-relative `position`.
    ///
    /// Fails with [`OvbaError::BitWidthOverflow`] when the position would need
    /// more than 12 offset bits, i.e. `position > 4096`.
    pub fn for_position(position: usize) -> Result<Self> {
        let bit_count = raw_bit_count(position).max(MIN_OFFSET_BITS);
        if bit_count > MAX_OFFSET_BITS {
            return Err(OvbaError::BitWidthOverflow {
                position,
                bit_count,
            });
        }
        Ok(Self::from_offset_bits(bit_count))
    }

    /// Table-backed variant of [`for_position`](Self::for_position).
    pub fn lookup(position: usize) -> Result<Self> {
        match TABLE.get(position) {
            Some(width) => Ok(*width),
            None => Self::for_position(position),
        }
    }

    fn from_offset_bits(offset_bit_count: u32) -> Self {
        let length_mask = 0xFFFFu16 >> offset_bit_count;
        Self {
            offset_bit_count,
            length_mask,
            offset_mask: !length_mask,
            maximum_length: length_mask + MIN_MATCH_LENGTH as u16,
        }
    }

    /// Bits holding `offset - 1`.
    pub fn offset_bit_count(&self) -> u32 {
        self.offset_bit_count
    }

    /// Bits holding `length - 3`; also the shift applied to the offset field.
    pub fn length_bit_count(&self) -> u32 {
        TOKEN_BITS - self.offset_bit_count
    }

    pub fn length_mask(&self) -> u16 {
        self.length_mask
    }

    pub fn offset_mask(&self) -> u16 {
        self.offset_mask
    }

    /// Longest run a copy token can describe at this position.
    pub fn maximum_length(&self) -> u16 {
        self.maximum_length
    }
}
