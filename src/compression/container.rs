//! The compressed container: a signature byte followed by chunks.
//!
//! Chunks never reference each other, so both directions can be fanned out
//! over a rayon pool; output order always follows chunk order.

use std::io::Cursor;

use rayon::prelude::*;

use crate::error::{OvbaError, Result};

use super::chunk::CompressedChunk;
use super::constants::{MAX_BYTES_PER_CHUNK, SIGNATURE_BYTE};
use super::token::Token;

/// An ordered list of independently compressed chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressedContainer {
    chunks: Vec<CompressedChunk>,
}

impl CompressedContainer {
    /// Split `data` into 4096-byte chunks and compress each one.
    pub fn from_decompressed(data: &[u8], parallel: bool) -> Result<Self> {
        let chunks = if parallel {
            data.par_chunks(MAX_BYTES_PER_CHUNK)
                .map(CompressedChunk::compress)
                .collect::<Result<Vec<_>>>()?
        } else {
            data.chunks(MAX_BYTES_PER_CHUNK)
                .map(CompressedChunk::compress)
                .collect::<Result<Vec<_>>>()?
        };
        Ok(Self { chunks })
    }

    /// Parse a compressed container.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        match bytes.first() {
            Some(&SIGNATURE_BYTE) => {}
            Some(other) => {
                return Err(OvbaError::format(
                    0,
                    format!(
                        "invalid signature byte {:#04X}, expected {:#04X}",
                        other, SIGNATURE_BYTE
                    ),
                ))
            }
            None => return Err(OvbaError::format(0, "missing signature byte")),
        }

        let body = &bytes[1..];
        let mut reader = Cursor::new(body);
        let mut chunks = Vec::new();
        while (reader.position() as usize) < body.len() {
            chunks.push(CompressedChunk::parse(&mut reader, 1)?);
        }

        Ok(Self { chunks })
    }

    /// Serialize the signature byte and every chunk.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let capacity = 1 + self
            .chunks
            .iter()
            .map(|c| c.header().chunk_size())
            .sum::<usize>();
        let mut out = Vec::with_capacity(capacity);
        out.push(SIGNATURE_BYTE);
        for chunk in &self.chunks {
            chunk.write_to(&mut out)?;
        }
        Ok(out)
    }

    /// Decode every chunk and concatenate the results.
    pub fn decompress(&self, parallel: bool) -> Result<Vec<u8>> {
        let decoded: Vec<Vec<u8>> = if parallel {
            self.chunks
                .par_iter()
                .map(CompressedChunk::decompress)
                .collect::<Result<_>>()?
        } else {
            self.chunks
                .iter()
                .map(CompressedChunk::decompress)
                .collect::<Result<_>>()?
        };
        Ok(decoded.concat())
    }

    pub fn chunks(&self) -> &[CompressedChunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Every token of every compressed chunk, in order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.chunks.iter().flat_map(|c| c.tokens())
    }
}
