//! Copy token packing and expansion.
//!
//! A copy token is a 16-bit little-endian word holding `offset - 1` in its
//! high bits and `length - 3` in its low bits. Where the split falls depends
//! on the token's position in the chunk (see [`BitWidth`]), and that position
//! is never stored: the reader has to track it.

use crate::error::{OvbaError, Result};

use super::bit_width::BitWidth;
use super::constants::MIN_MATCH_LENGTH;

/// Pack `offset` and `length` into a copy token word for `position`.
pub fn pack(position: usize, offset: u16, length: u16) -> Result<u16> {
    let width = BitWidth::lookup(position)?;

    if length > width.maximum_length() {
        return Err(OvbaError::EncodingOverflow {
            position,
            length: length as usize,
            maximum: width.maximum_length() as usize,
        });
    }
    debug_assert!(offset >= 1 && length as usize >= MIN_MATCH_LENGTH);

    let offset_field = offset.wrapping_sub(1) << width.length_bit_count();
    let length_field = length - MIN_MATCH_LENGTH as u16;
    Ok(offset_field | length_field)
}

/// Unpack a copy token word read at `position` into `(offset, length)`.
pub fn unpack(word: u16, position: usize) -> Result<(u16, u16)> {
    let width = BitWidth::lookup(position)?;

    let length = (word & width.length_mask()) + MIN_MATCH_LENGTH as u16;
    let offset = ((word & width.offset_mask()) >> width.length_bit_count()) + 1;
    Ok((offset, length))
}

/// A back-reference into the bytes already produced for the current chunk.
///
/// Two copy tokens are equal only when position, offset and length all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CopyToken {
    position: usize,
    offset: u16,
    length: u16,
}

impl CopyToken {
    pub fn new(position: usize, offset: u16, length: u16) -> Self {
        Self {
            position,
            offset,
            length,
        }
    }

    /// Read a token word found at chunk-relative `position`.
    pub fn decode(word: u16, position: usize) -> Result<Self> {
        let (offset, length) = unpack(word, position)?;
        Ok(Self::new(position, offset, length))
    }

    /// Pack this token into its wire word.
    pub fn encode(&self) -> Result<u16> {
        pack(self.position, self.offset, self.length)
    }

    /// Chunk-relative position of the first byte this token produces.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Distance back to the start of the copied run.
    pub fn offset(&self) -> u16 {
        self.offset
    }

    /// Number of bytes produced.
    pub fn length(&self) -> u16 {
        self.length
    }

    /// Append the referenced run to `chunk`, the bytes decoded so far for
    /// this chunk.
    ///
    /// When `length > offset` the run overlaps the bytes it is producing, so
    /// the already-available window of `offset` bytes is repeated.
    ///
    /// A token has no input offset of its own, so a [`OvbaError::Format`]
    /// from here carries the token's chunk position instead. Tokens read by
    /// [`TokenSequence::parse`](super::TokenSequence::parse) never fail here:
    /// parsing already rejects offsets reaching before the chunk start.
    pub fn expand_into(&self, chunk: &mut Vec<u8>) -> Result<()> {
        let offset = self.offset as usize;
        let length = self.length as usize;

        if offset == 0 || offset > chunk.len() {
            return Err(OvbaError::format(
                self.position,
                format!(
                    "copy token at chunk position {} has offset {} but only {} bytes are decoded",
                    self.position,
                    offset,
                    chunk.len()
                ),
            ));
        }

        let source = chunk.len() - offset;
        chunk.reserve(length);
        chunk.extend_from_within(source..source + offset.min(length));
        for i in offset..length {
            let byte = chunk[source + i % offset];
            chunk.push(byte);
        }
        Ok(())
    }
}
