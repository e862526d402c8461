//! Constants and magic numbers of the compressed container format.

/// First byte of every compressed container.
pub const SIGNATURE_BYTE: u8 = 0x01;

/// Maximum number of decompressed bytes carried by one chunk.
pub const MAX_BYTES_PER_CHUNK: usize = 4096;

/// Size of the little-endian chunk header.
pub const CHUNK_HEADER_BYTES: usize = 2;

/// Fill byte appended to a short raw chunk.
pub const PADDING_BYTE: u8 = 0x00;

/// Smallest legal chunk (header + one data byte).
pub const MIN_CHUNK_SIZE: usize = 3;

/// Largest legal chunk (header + 4096 data bytes).
pub const MAX_CHUNK_SIZE: usize = CHUNK_HEADER_BYTES + MAX_BYTES_PER_CHUNK;

/// Tokens grouped behind one flag byte.
pub const TOKENS_PER_SEQUENCE: usize = 8;

/// Shortest run worth a copy token.
pub const MIN_MATCH_LENGTH: usize = 3;

/// Chunk header bit fields.
pub mod header {
    /// Signature nibble of a compressed chunk (`0b1011`).
    pub const COMPRESSED_SIGNATURE: u16 = 0xB000;
    /// Signature nibble of a raw chunk (`0b0011`).
    pub const RAW_SIGNATURE: u16 = 0x3000;
    /// Bits 15-12.
    pub const SIGNATURE_MASK: u16 = 0xF000;
    /// Bits 11-0.
    pub const SIZE_MASK: u16 = 0x0FFF;
    /// Stored size is the total chunk size minus this bias.
    pub const SIZE_BIAS: usize = 3;
}

/// Copy token bit split limits.
pub mod copy_token {
    /// Fewest bits ever spent on the offset field.
    pub const MIN_OFFSET_BITS: u32 = 4;
    /// Most bits ever spent on the offset field.
    pub const MAX_OFFSET_BITS: u32 = 12;
    /// Width of a packed copy token.
    pub const TOKEN_BITS: u32 = 16;
}
