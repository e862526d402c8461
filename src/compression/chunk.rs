//! A single compressed chunk: header plus token sequences or raw bytes.

use std::io::Cursor;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{OvbaError, Result};

use super::chunk_header::ChunkHeader;
use super::constants::{CHUNK_HEADER_BYTES, MAX_BYTES_PER_CHUNK, PADDING_BYTE};
use super::matcher;
use super::token::Token;
use super::token_sequence::TokenSequence;

/// Payload of a chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkData {
    /// Token sequences describing up to 4096 decompressed bytes.
    Compressed(Vec<TokenSequence>),
    /// Exactly 4096 bytes stored as-is.
    Raw(Vec<u8>),
}

impl ChunkData {
    /// Serialized size of the payload.
    pub fn encoded_len(&self) -> usize {
        match self {
            ChunkData::Compressed(sequences) => {
                sequences.iter().map(TokenSequence::encoded_len).sum()
            }
            ChunkData::Raw(bytes) => bytes.len(),
        }
    }
}

/// Header and payload of one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedChunk {
    header: ChunkHeader,
    data: ChunkData,
}

impl CompressedChunk {
    /// Compress one decompressed chunk of at most 4096 bytes.
    ///
    /// Falls back to raw storage when the token form would take 4096 bytes or
    /// more; the raw form is padded with zero bytes to exactly 4096.
    pub fn compress(decompressed: &[u8]) -> Result<Self> {
        debug_assert!(decompressed.len() <= MAX_BYTES_PER_CHUNK);

        let sequences = TokenSequence::group(matcher::tokenize(decompressed)?);
        let data = ChunkData::Compressed(sequences);
        let size = data.encoded_len();

        if size >= MAX_BYTES_PER_CHUNK {
            let mut raw = decompressed.to_vec();
            raw.resize(MAX_BYTES_PER_CHUNK, PADDING_BYTE);
            return Ok(Self {
                header: ChunkHeader::raw(),
                data: ChunkData::Raw(raw),
            });
        }

        Ok(Self {
            header: ChunkHeader::compressed(size)?,
            data,
        })
    }

    /// Read one chunk from `reader`; `base_offset` is the input offset of the
    /// reader's start and is only used for error reporting.
    pub fn parse(reader: &mut Cursor<&[u8]>, base_offset: usize) -> Result<Self> {
        let input = *reader.get_ref();
        let start = reader.position() as usize;

        let word_bytes = input
            .get(start..start + CHUNK_HEADER_BYTES)
            .ok_or_else(|| OvbaError::format(base_offset + start, "chunk header truncated"))?;
        let header = ChunkHeader::decode(
            u16::from_le_bytes([word_bytes[0], word_bytes[1]]),
            base_offset + start,
        )?;

        let data_start = start + CHUNK_HEADER_BYTES;
        let data_end = data_start + header.data_size();
        let payload = input.get(data_start..data_end).ok_or_else(|| {
            OvbaError::format(
                base_offset + start,
                format!(
                    "chunk declares {} data bytes but only {} remain",
                    header.data_size(),
                    input.len().saturating_sub(data_start)
                ),
            )
        })?;
        reader.set_position(data_end as u64);

        let data = if header.is_compressed() {
            ChunkData::Compressed(parse_sequences(payload, base_offset + data_start)?)
        } else {
            ChunkData::Raw(payload.to_vec())
        };

        Ok(Self { header, data })
    }

    /// Serialize header and payload.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        out.write_u16::<LittleEndian>(self.header.encode())?;
        match &self.data {
            ChunkData::Compressed(sequences) => {
                for sequence in sequences {
                    sequence.write_to(out)?;
                }
            }
            ChunkData::Raw(bytes) => out.extend_from_slice(bytes),
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.header.chunk_size());
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Decode the chunk back into its decompressed bytes.
    ///
    /// A raw chunk yields its 4096 stored bytes, padding included.
    pub fn decompress(&self) -> Result<Vec<u8>> {
        match &self.data {
            ChunkData::Raw(bytes) => Ok(bytes.clone()),
            ChunkData::Compressed(sequences) => {
                let mut chunk = Vec::with_capacity(MAX_BYTES_PER_CHUNK);
                for token in sequences.iter().flat_map(|s| s.tokens()) {
                    token.decode_into(&mut chunk)?;
                }
                Ok(chunk)
            }
        }
    }

    pub fn header(&self) -> &ChunkHeader {
        &self.header
    }

    pub fn data(&self) -> &ChunkData {
        &self.data
    }

    pub fn is_compressed(&self) -> bool {
        self.header.is_compressed()
    }

    /// Token sequences of a compressed chunk; empty for a raw chunk.
    pub fn sequences(&self) -> &[TokenSequence] {
        match &self.data {
            ChunkData::Compressed(sequences) => sequences,
            ChunkData::Raw(_) => &[],
        }
    }

    /// All tokens of a compressed chunk in order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sequences().iter().flat_map(|s| s.tokens())
    }
}

/// Parse compressed chunk data, threading the decoded position through
/// every sequence so each one can enforce the 4096-byte chunk limit.
fn parse_sequences(payload: &[u8], base_offset: usize) -> Result<Vec<TokenSequence>> {
    let mut reader = Cursor::new(payload);
    let mut sequences = Vec::new();
    let mut position = 0usize;

    while (reader.position() as usize) < payload.len() {
        let sequence = TokenSequence::parse(&mut reader, position, base_offset)?;
        position += sequence.decompressed_len();
        sequences.push(sequence);
    }

    Ok(sequences)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_literal_only_chunk() {
        let chunk = CompressedChunk::compress(b"abcdefghijklmnopqrstuv.").unwrap();
        assert!(chunk.is_compressed());
        assert_eq!(chunk.sequences().len(), 3);
        assert_eq!(chunk.header().chunk_size(), 28);
        assert!(chunk.tokens().all(|t| !t.is_copy()));
    }

    #[test]
    fn test_compress_repeated_byte_chunk() {
        let chunk = CompressedChunk::compress(&[b'a'; 73]).unwrap();
        assert_eq!(
            chunk.to_bytes().unwrap(),
            vec![0x03, 0xB0, 0x02, 0x61, 0x45, 0x00]
        );
        assert_eq!(chunk.decompress().unwrap(), vec![b'a'; 73]);
    }

    #[test]
    fn test_incompressible_chunk_goes_raw() {
        // Counter pairs leave too few 3-byte repeats to pay for the flag bytes.
        let data: Vec<u8> = (0..2048u32)
            .flat_map(|i| [(i % 251) as u8, (i / 251) as u8])
            .collect();
        let chunk = CompressedChunk::compress(&data).unwrap();

        assert!(!chunk.is_compressed());
        assert_eq!(chunk.header().encode(), 0x3FFF);
        assert_eq!(chunk.to_bytes().unwrap().len(), 4098);
        assert_eq!(chunk.decompress().unwrap(), data);
    }

    #[test]
    fn test_short_raw_chunk_is_padded() {
        let data: Vec<u8> = (0..1900u32)
            .flat_map(|i| [(i % 251) as u8, (i / 251) as u8])
            .collect();
        let chunk = CompressedChunk::compress(&data[..3800]).unwrap();

        assert!(!chunk.is_compressed());
        let decoded = chunk.decompress().unwrap();
        assert_eq!(decoded.len(), 4096);
        assert_eq!(&decoded[..3800], &data[..3800]);
        assert!(decoded[3800..].iter().all(|b| *b == PADDING_BYTE));
    }

    #[test]
    fn test_parse_round_trip() {
        let data = b"#aaabcdefaaaaghijaaaaaklaaamnopqaaaaaaaaaaaarstuvwxyzaaa";
        let bytes = CompressedChunk::compress(data).unwrap().to_bytes().unwrap();

        let mut reader = Cursor::new(bytes.as_slice());
        let parsed = CompressedChunk::parse(&mut reader, 1).unwrap();
        assert_eq!(reader.position() as usize, bytes.len());
        assert_eq!(parsed.to_bytes().unwrap(), bytes);
        assert_eq!(parsed.decompress().unwrap(), data.to_vec());
    }

    #[test]
    fn test_parse_rejects_overlong_declared_size() {
        let bytes = [0x10u8, 0xB0, 0x00, 0x61];
        let mut reader = Cursor::new(&bytes[..]);
        let err = CompressedChunk::parse(&mut reader, 1).unwrap_err();
        assert_eq!(err.offset(), Some(1));
    }

    #[test]
    fn test_parse_rejects_chunk_decoding_past_4096() {
        // 'a' then two copies of 4098 bytes each.
        let bytes = [0x05u8, 0xB0, 0x06, 0x61, 0xFF, 0x0F, 0xFF, 0x0F];
        let mut reader = Cursor::new(&bytes[..]);
        let err = CompressedChunk::parse(&mut reader, 0).unwrap_err();
        assert!(matches!(err, OvbaError::Format { offset: 4, .. }));
    }

    #[test]
    fn test_parse_rejects_overrun_in_later_sequence() {
        // Eight literals, then a second sequence whose 4095-byte copy at
        // position 8 carries the chunk to 4103 bytes.
        let word = crate::compression::copy_token::pack(8, 1, 4095).unwrap();
        let mut bytes = vec![0x0B, 0xB0, 0x00];
        bytes.extend_from_slice(b"abcdefgh");
        bytes.push(0x01);
        bytes.extend_from_slice(&word.to_le_bytes());
        let mut reader = Cursor::new(bytes.as_slice());
        let err = CompressedChunk::parse(&mut reader, 0).unwrap_err();
        assert!(matches!(err, OvbaError::Format { offset: 12, .. }));
    }

    #[test]
    fn test_parse_rejects_empty_sequence() {
        let bytes = [0x00u8, 0xB0, 0x00];
        let mut reader = Cursor::new(&bytes[..]);
        let err = CompressedChunk::parse(&mut reader, 1).unwrap_err();
        assert!(matches!(err, OvbaError::Format { offset: 3, .. }));
    }
}
