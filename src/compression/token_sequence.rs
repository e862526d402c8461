//! Token sequences: one flag byte followed by up to eight tokens.

use std::io::Cursor;

use bitflags::bitflags;
use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{OvbaError, Result};

use super::constants::{MAX_BYTES_PER_CHUNK, TOKENS_PER_SEQUENCE};
use super::copy_token::CopyToken;
use super::token::Token;

bitflags! {
    /// Flag byte of a token sequence. Bit `i` set means slot `i` holds a
    /// copy token; clear means a literal.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SequenceFlags: u8 {
        const SLOT_0 = 1 << 0;
        const SLOT_1 = 1 << 1;
        const SLOT_2 = 1 << 2;
        const SLOT_3 = 1 << 3;
        const SLOT_4 = 1 << 4;
        const SLOT_5 = 1 << 5;
        const SLOT_6 = 1 << 6;
        const SLOT_7 = 1 << 7;
    }
}

impl SequenceFlags {
    /// Flag for slot `index` (0..8).
    pub fn slot(index: usize) -> Self {
        Self::from_bits_retain(1 << index)
    }

    /// Whether slot `index` holds a copy token.
    pub fn is_copy(&self, index: usize) -> bool {
        self.contains(Self::slot(index))
    }
}

/// A flag byte and the tokens it describes.
///
/// Every sequence of a chunk holds exactly 8 tokens except the last one,
/// which holds 1 to 8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSequence {
    flags: SequenceFlags,
    tokens: Vec<Token>,
}

impl TokenSequence {
    fn from_tokens(tokens: Vec<Token>) -> Self {
        debug_assert!(!tokens.is_empty() && tokens.len() <= TOKENS_PER_SEQUENCE);

        let flags = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.is_copy())
            .fold(SequenceFlags::empty(), |flags, (i, _)| {
                flags | SequenceFlags::slot(i)
            });
        Self { flags, tokens }
    }

    /// Group a chunk's tokens into sequences of eight.
    pub fn group(tokens: Vec<Token>) -> Vec<TokenSequence> {
        tokens
            .chunks(TOKENS_PER_SEQUENCE)
            .map(|group| Self::from_tokens(group.to_vec()))
            .collect()
    }

    /// Read one sequence from compressed chunk data.
    ///
    /// `position` is the number of bytes already decoded in this chunk and
    /// `base_offset` the offset of the chunk data within the whole input,
    /// used for error reporting. Reading stops early when the data runs out,
    /// which is how the final sequence of a chunk ends, but a sequence must
    /// hold at least one token and may not carry the chunk past 4096 bytes.
    pub fn parse(
        reader: &mut Cursor<&[u8]>,
        mut position: usize,
        base_offset: usize,
    ) -> Result<Self> {
        let end = reader.get_ref().len() as u64;
        let flag_at = base_offset + reader.position() as usize;
        let flags = SequenceFlags::from_bits_retain(
            reader
                .read_u8()
                .map_err(|_| OvbaError::format(flag_at, "missing token sequence flag byte"))?,
        );

        let mut tokens = Vec::with_capacity(TOKENS_PER_SEQUENCE);
        for slot in 0..TOKENS_PER_SEQUENCE {
            if reader.position() >= end {
                break;
            }
            let at = base_offset + reader.position() as usize;

            let token = if flags.is_copy(slot) {
                let word = reader
                    .read_u16::<LittleEndian>()
                    .map_err(|_| OvbaError::format(at, "copy token truncated"))?;
                let copy = CopyToken::decode(word, position)?;
                if copy.offset() as usize > position {
                    return Err(OvbaError::format(
                        at,
                        format!(
                            "copy token offset {} at chunk position {} reaches before chunk start",
                            copy.offset(),
                            position
                        ),
                    ));
                }
                Token::Copy(copy)
            } else {
                Token::Literal(
                    reader
                        .read_u8()
                        .map_err(|_| OvbaError::format(at, "literal token truncated"))?,
                )
            };

            position += token.decompressed_len();
            if position > MAX_BYTES_PER_CHUNK {
                return Err(OvbaError::format(
                    at,
                    format!(
                        "chunk decodes to {} bytes, more than {}",
                        position, MAX_BYTES_PER_CHUNK
                    ),
                ));
            }
            tokens.push(token);
        }

        if tokens.is_empty() {
            return Err(OvbaError::format(
                flag_at,
                "token sequence has a flag byte but no tokens",
            ));
        }

        Ok(Self { flags, tokens })
    }

    /// Serialize the flag byte and tokens.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        out.push(self.flags.bits());
        for token in &self.tokens {
            token.encode_into(out)?;
        }
        Ok(())
    }

    pub fn flags(&self) -> SequenceFlags {
        self.flags
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Bytes produced by decoding every token of the sequence.
    pub fn decompressed_len(&self) -> usize {
        self.tokens.iter().map(Token::decompressed_len).sum()
    }

    /// Serialized size including the flag byte.
    pub fn encoded_len(&self) -> usize {
        1 + self.tokens.iter().map(Token::encoded_len).sum::<usize>()
    }
}
