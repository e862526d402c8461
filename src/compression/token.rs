//! Literal / copy tokens.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::Result;

use super::copy_token::CopyToken;

/// One unit of compressed chunk data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A single byte carried through unchanged.
    Literal(u8),
    /// A back-reference into the current chunk.
    Copy(CopyToken),
}

impl Token {
    pub fn is_copy(&self) -> bool {
        matches!(self, Token::Copy(_))
    }

    /// Bytes this token produces when decoded.
    pub fn decompressed_len(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Copy(copy) => copy.length() as usize,
        }
    }

    /// Bytes this token occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Copy(_) => 2,
        }
    }

    /// Serialize the token.
    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        match self {
            Token::Literal(byte) => out.push(*byte),
            Token::Copy(copy) => out.write_u16::<LittleEndian>(copy.encode()?)?,
        }
        Ok(())
    }

    /// Append the bytes this token stands for to the chunk decoded so far.
    pub fn decode_into(&self, chunk: &mut Vec<u8>) -> Result<()> {
        match self {
            Token::Literal(byte) => {
                chunk.push(*byte);
                Ok(())
            }
            Token::Copy(copy) => copy.expand_into(chunk),
        }
    }
}
