//! The 2-byte header in front of every chunk.
//!
//! ```text
//! bits 15-12  signature: 0b1011 compressed, 0b0011 raw
//! bits 11-0   total chunk size (header included) minus 3
//! ```

use crate::error::{OvbaError, Result};

use super::constants::header::{
    COMPRESSED_SIGNATURE, RAW_SIGNATURE, SIGNATURE_MASK, SIZE_BIAS, SIZE_MASK,
};
use super::constants::{CHUNK_HEADER_BYTES, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE};

/// Decoded chunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    compressed: bool,
    chunk_size: usize,
}

impl ChunkHeader {
    /// Header for compressed chunk data of `data_len` bytes.
    pub fn compressed(data_len: usize) -> Result<Self> {
        let header = Self {
            compressed: true,
            chunk_size: data_len + CHUNK_HEADER_BYTES,
        };
        header.validate(0)?;
        Ok(header)
    }

    /// Header for a raw chunk, which always carries 4096 data bytes.
    pub fn raw() -> Self {
        Self {
            compressed: false,
            chunk_size: MAX_CHUNK_SIZE,
        }
    }

    /// Decode a header word read at input `offset`.
    pub fn decode(word: u16, offset: usize) -> Result<Self> {
        let compressed = match word & SIGNATURE_MASK {
            COMPRESSED_SIGNATURE => true,
            RAW_SIGNATURE => false,
            other => {
                return Err(OvbaError::format(
                    offset,
                    format!("invalid chunk signature {:#X}", other >> 12),
                ))
            }
        };

        let header = Self {
            compressed,
            chunk_size: (word & SIZE_MASK) as usize + SIZE_BIAS,
        };
        header.validate(offset)?;
        Ok(header)
    }

    /// Encode into the header word.
    pub fn encode(&self) -> u16 {
        let signature = if self.compressed {
            COMPRESSED_SIGNATURE
        } else {
            RAW_SIGNATURE
        };
        signature | ((self.chunk_size - SIZE_BIAS) as u16 & SIZE_MASK)
    }

    fn validate(&self, offset: usize) -> Result<()> {
        if self.chunk_size < MIN_CHUNK_SIZE || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(OvbaError::format(
                offset,
                format!(
                    "chunk size {} outside {}..={}",
                    self.chunk_size, MIN_CHUNK_SIZE, MAX_CHUNK_SIZE
                ),
            ));
        }
        if !self.compressed && self.chunk_size != MAX_CHUNK_SIZE {
            return Err(OvbaError::format(
                offset,
                format!(
                    "raw chunk size {} must be {}",
                    self.chunk_size, MAX_CHUNK_SIZE
                ),
            ));
        }
        Ok(())
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Total chunk size, header included.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Size of the data following the header.
    pub fn data_size(&self) -> usize {
        self.chunk_size - CHUNK_HEADER_BYTES
    }
}
