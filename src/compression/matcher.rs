//! Greedy longest-match search over one decompressed chunk.
//!
//! Every earlier position in the chunk is tried as a match candidate, most
//! recent first. There is no hash table: the chunk is at most 4096 bytes and
//! the output has to agree with the reference tokenization.

use crate::error::Result;

use super::bit_width::BitWidth;
use super::constants::MIN_MATCH_LENGTH;
use super::copy_token::CopyToken;
use super::token::Token;

/// A match found at some chunk position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Distance back to the matched run (>= 1).
    pub offset: u16,
    /// Run length, already clamped to the position's maximum.
    pub length: u16,
}

/// Find the longest earlier run matching the bytes at `position`.
///
/// Candidates are scanned from `position - 1` down to 0 and only a strictly
/// longer run replaces the best so far, so ties go to the closest candidate.
/// Returns `None` when no run of at least 3 bytes exists.
pub fn find_match(data: &[u8], position: usize) -> Result<Option<Match>> {
    let end = data.len();
    let mut best_length = 0usize;
    let mut best_candidate = 0usize;

    for candidate in (0..position).rev() {
        let mut c = candidate;
        let mut d = position;
        while d < end && data[d] == data[c] {
            c += 1;
            d += 1;
        }

        let length = d - position;
        if length > best_length {
            best_length = length;
            best_candidate = candidate;
        }
    }

    if best_length < MIN_MATCH_LENGTH {
        return Ok(None);
    }

    let maximum = BitWidth::lookup(position)?.maximum_length() as usize;
    Ok(Some(Match {
        offset: (position - best_candidate) as u16,
        length: best_length.min(maximum) as u16,
    }))
}

/// Split a decompressed chunk into literal and copy tokens.
pub fn tokenize(data: &[u8]) -> Result<Vec<Token>> {
    let mut tokens = Vec::with_capacity(data.len());
    let mut position = 0usize;

    while position < data.len() {
        match find_match(data, position)? {
            Some(m) => {
                tokens.push(Token::Copy(CopyToken::new(position, m.offset, m.length)));
                position += m.length as usize;
            }
            None => {
                tokens.push(Token::Literal(data[position]));
                position += 1;
            }
        }
    }

    Ok(tokens)
}
