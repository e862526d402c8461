//! Chunked LZ77 compression and decompression for VBA project streams.
//!
//! The pipeline, compress direction:
//!
//! 1. [`container`] splits the input into 4096-byte chunks.
//! 2. [`matcher`] turns each chunk into literal and copy tokens.
//! 3. [`token_sequence`] groups tokens eight at a time behind a flag byte.
//! 4. [`chunk`] serializes the sequences behind a [`chunk_header`], or stores
//!    the chunk raw when that is not smaller.
//!
//! Decompression walks the same structures backwards, threading the
//! chunk-relative position needed by [`copy_token::unpack`].

pub mod bit_width;
pub mod chunk;
pub mod chunk_header;
pub mod constants;
pub mod container;
pub mod copy_token;
pub mod matcher;
pub mod token;
pub mod token_sequence;

pub use bit_width::BitWidth;
pub use chunk::{ChunkData, CompressedChunk};
pub use chunk_header::ChunkHeader;
pub use container::CompressedContainer;
pub use copy_token::CopyToken;
pub use token::Token;
pub use token_sequence::{SequenceFlags, TokenSequence};

use crate::error::Result;
use crate::notification::{NotificationCollection, NotificationType};

use constants::MAX_BYTES_PER_CHUNK;

/// Trait for compressing data.
pub trait Compressor {
    /// Compress a whole buffer into a compressed container.
    fn compress(&mut self, source: &[u8]) -> Result<Vec<u8>>;
}

/// Trait for decompressing data.
pub trait Decompressor {
    /// Decompress a whole compressed container.
    fn decompress(&mut self, source: &[u8]) -> Result<Vec<u8>>;
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration options for the compressor.
#[derive(Debug, Clone)]
pub struct CompressionConfiguration {
    /// When `true`, chunks are compressed on the rayon thread pool.
    ///
    /// Output is identical either way. Default: `false`.
    pub parallel: bool,
}

impl Default for CompressionConfiguration {
    fn default() -> Self {
        Self { parallel: false }
    }
}

/// Configuration options for the decompressor.
#[derive(Debug, Clone)]
pub struct DecompressionConfiguration {
    /// When `true`, parsed chunks are decoded on the rayon thread pool.
    ///
    /// Default: `false`.
    pub parallel: bool,
}

impl Default for DecompressionConfiguration {
    fn default() -> Self {
        Self { parallel: false }
    }
}

// ---------------------------------------------------------------------------
// Compressor
// ---------------------------------------------------------------------------

/// Compressor producing the VBA compressed container format.
#[derive(Debug, Clone, Default)]
pub struct VbaCompressor {
    config: CompressionConfiguration,
    notifications: NotificationCollection,
}

impl VbaCompressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_configuration(config: CompressionConfiguration) -> Self {
        Self {
            config,
            notifications: NotificationCollection::new(),
        }
    }

    /// Notifications recorded by the last call.
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    /// Compress into a container without serializing it.
    pub fn compress_container(&mut self, source: &[u8]) -> Result<CompressedContainer> {
        self.notifications.clear();
        let container = CompressedContainer::from_decompressed(source, self.config.parallel)?;

        for (index, (chunk, input)) in container
            .chunks()
            .iter()
            .zip(source.chunks(MAX_BYTES_PER_CHUNK))
            .enumerate()
        {
            if chunk.is_compressed() {
                continue;
            }
            self.notifications.notify(
                NotificationType::Info,
                index,
                "compression did not shrink the chunk; stored raw",
            );
            if input.len() < MAX_BYTES_PER_CHUNK {
                self.notifications.notify(
                    NotificationType::Warning,
                    index,
                    format!(
                        "raw chunk padded from {} to {} bytes; decompression returns the padding",
                        input.len(),
                        MAX_BYTES_PER_CHUNK
                    ),
                );
            }
        }

        Ok(container)
    }
}

impl Compressor for VbaCompressor {
    fn compress(&mut self, source: &[u8]) -> Result<Vec<u8>> {
        self.compress_container(source)?.to_bytes()
    }
}

// ---------------------------------------------------------------------------
// Decompressor
// ---------------------------------------------------------------------------

/// Decompressor for the VBA compressed container format.
#[derive(Debug, Clone, Default)]
pub struct VbaDecompressor {
    config: DecompressionConfiguration,
    notifications: NotificationCollection,
}

impl VbaDecompressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_configuration(config: DecompressionConfiguration) -> Self {
        Self {
            config,
            notifications: NotificationCollection::new(),
        }
    }

    /// Notifications recorded by the last call.
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }
}

impl Decompressor for VbaDecompressor {
    fn decompress(&mut self, source: &[u8]) -> Result<Vec<u8>> {
        self.notifications.clear();
        let container = CompressedContainer::parse(source)?;

        for (index, chunk) in container.chunks().iter().enumerate() {
            if !chunk.is_compressed() {
                self.notifications
                    .notify(NotificationType::Info, index, "raw chunk");
            }
        }

        container.decompress(self.config.parallel)
    }
}
