//! Shared test utilities for ovba-compression integration tests.
//!
//! Holds the fixture helpers (hex parsing, Windows-1252 text, generated
//! inputs) and the low-level token comparison used by the conformance tests.

#![allow(dead_code)]

use ovba_compression::compression::{CompressedContainer, CopyToken, Token};

// ===========================================================================
// Fixture helpers
// ===========================================================================

/// Parse a space-separated hex string such as `"01 19 B0"`.
pub fn hex(text: &str) -> Vec<u8> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    assert!(digits.len() % 2 == 0, "odd number of hex digits");
    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).expect("invalid hex digit"))
        .collect()
}

/// Encode fixture text the way a VBA project on a Western code page stores it.
pub fn windows_1252(text: &str) -> Vec<u8> {
    let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(text);
    assert!(!had_errors, "fixture text not representable in Windows-1252");
    bytes.into_owned()
}

/// Byte pairs `(first, second)` for all `first != second`, which leaves
/// too few 3-byte repeats for compression to pay off.
pub fn low_compressibility_bytes() -> Vec<u8> {
    let mut data = Vec::new();
    for second in 0..u8::MAX {
        for first in 0..u8::MAX {
            if first != second {
                data.push(first);
                data.push(second);
            }
        }
    }
    data
}

/// Deterministic pseudo-random bytes drawn from `alphabet`.
pub fn noisy_bytes(len: usize, alphabet: &[u8], seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            alphabet[(state >> 16) as usize % alphabet.len()]
        })
        .collect()
}

// ===========================================================================
// Low-level comparison
// ===========================================================================

/// Copy tokens of every compressed chunk in a container.
pub fn copy_tokens(container: &CompressedContainer) -> Vec<CopyToken> {
    container
        .tokens()
        .filter_map(|t| match t {
            Token::Copy(copy) => Some(*copy),
            Token::Literal(_) => None,
        })
        .collect()
}

/// Number of chunks stored compressed / raw.
pub fn chunk_kinds(container: &CompressedContainer) -> (usize, usize) {
    let compressed = container
        .chunks()
        .iter()
        .filter(|c| c.is_compressed())
        .count();
    (compressed, container.len() - compressed)
}
