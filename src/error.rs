//! Error types for the ovba-compression library

use std::io;
use thiserror::Error;

/// Main error type for compression and decompression operations
#[derive(Debug, Error)]
pub enum OvbaError {
    /// The compressed input violates the container layout
    #[error("Format error at byte {offset}: {reason}")]
    Format { offset: usize, reason: String },

    /// A copy token length does not fit the bit split of its position
    #[error("Copy length {length} exceeds maximum {maximum} at position {position}")]
    EncodingOverflow {
        position: usize,
        length: usize,
        maximum: usize,
    },

    /// A position needs more offset bits than a copy token can hold
    #[error("Position {position} requires {bit_count} offset bits (allowed 4..=12)")]
    BitWidthOverflow { position: usize, bit_count: u32 },

    /// IO error while writing into an output buffer
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl OvbaError {
    /// Build a [`OvbaError::Format`] at the given input offset.
    pub fn format(offset: usize, reason: impl Into<String>) -> Self {
        OvbaError::Format {
            offset,
            reason: reason.into(),
        }
    }

    /// Input offset of a format error, if this is one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            OvbaError::Format { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

/// Result type alias for ovba-compression operations
pub type Result<T> = std::result::Result<T, OvbaError>;
