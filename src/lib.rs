//! # ovba-compression
//!
//! A pure Rust implementation of the chunked LZ77 compression used for the
//! source streams of VBA projects in Office documents.
//!
//! ## Features
//!
//! - Compress any byte buffer into the compressed container format
//! - Decompress containers produced by Office or by this crate
//! - Inspect containers down to individual chunks and tokens
//! - Optional per-chunk parallelism on the rayon thread pool
//!
//! ## Quick Start
//!
//! ```rust
//! let source = b"Attribute VB_Name = \"Module1\"".repeat(8);
//!
//! let compressed = ovba_compression::compress(&source)?;
//! assert_eq!(compressed[0], 0x01);
//!
//! let decompressed = ovba_compression::decompress(&compressed)?;
//! assert_eq!(decompressed, source);
//! # Ok::<(), ovba_compression::OvbaError>(())
//! ```
//!
//! ## Format
//!
//! A container is a `0x01` signature byte followed by chunks. Each chunk
//! carries up to 4096 decompressed bytes behind a 2-byte header, either as
//! token sequences (a flag byte plus up to eight literal or copy tokens) or,
//! when that would not be smaller, as 4096 raw bytes. Chunks never refer to
//! each other.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod compression;
pub mod error;
pub mod notification;

// Re-export commonly used types
pub use compression::{
    CompressedContainer, CompressionConfiguration, Compressor, DecompressionConfiguration,
    Decompressor, VbaCompressor, VbaDecompressor,
};
pub use error::{OvbaError, Result};
pub use notification::{Notification, NotificationCollection, NotificationType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compress `data` into a compressed container.
///
/// The output always starts with the `0x01` signature byte; empty input
/// produces just that byte.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    VbaCompressor::new().compress(data)
}

/// Decompress a compressed container.
///
/// Fails with [`OvbaError::Format`] on a bad signature byte, an unknown chunk
/// signature, or a chunk size outside the allowed bounds.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    VbaDecompressor::new().decompress(data)
}
