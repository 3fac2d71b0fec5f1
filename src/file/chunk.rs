use crate::{
    file::{HeaderChunk, Track},
    reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
};
use core::fmt;

/// The four-character type tag of a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChunkTag([u8; 4]);

impl ChunkTag {
    /// The `MThd` header tag.
    pub const HEADER: Self = Self(*b"MThd");
    /// The `MTrk` track tag.
    pub const TRACK: Self = Self(*b"MTrk");

    /// The tag's four bytes as stored.
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            write!(f, "{}", char::from(byte))?;
        }
        Ok(())
    }
}

/// The decoded payload of a chunk.
///
/// Only the two tags of the SMF specification are interpreted; anything
/// else (vendor or future chunk types) is carried through as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ChunkPayload<'a> {
    /// An `MThd` payload.
    Header(HeaderChunk),
    /// An `MTrk` payload.
    Track(Track<'a>),
    /// Any other tag, uninterpreted.
    Unknown(&'a [u8]),
}

/// One length-prefixed chunk of an SMF file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Chunk<'a> {
    /// The chunk's four-character type tag.
    pub tag: ChunkTag,
    /// The declared payload length. Always equals the number of payload
    /// bytes consumed, however `payload` is structured.
    pub length: u32,
    /// The decoded payload.
    pub payload: ChunkPayload<'a>,
}

impl<'a> Chunk<'a> {
    /// Decode one chunk: a four-byte tag, a big-endian 32-bit length, and
    /// exactly that many payload bytes, delegated per tag.
    ///
    /// A declared length overrunning the buffer fails with
    /// [`TruncatedChunk`](ReaderErrorKind::TruncatedChunk); the length
    /// field cannot be trusted at that point, so the caller must abort.
    pub(crate) fn read(reader: &mut Reader<'a>) -> ReadResult<Self> {
        let tag = ChunkTag(reader.read_exact_size()?);
        let length = reader.read_u32_be()?;
        if length as usize > reader.remaining() {
            return Err(ReaderError::new(
                reader.buffer_position(),
                ReaderErrorKind::TruncatedChunk {
                    declared: length,
                    remaining: reader.remaining(),
                },
            ));
        }
        let payload_offset = reader.buffer_position();
        let payload_bytes = reader.read_exact(length as usize)?;

        let payload = match tag {
            ChunkTag::HEADER => {
                ChunkPayload::Header(HeaderChunk::read(payload_bytes, payload_offset)?)
            }
            ChunkTag::TRACK => ChunkPayload::Track(Track::read(payload_bytes, payload_offset)?),
            _ => ChunkPayload::Unknown(payload_bytes),
        };

        Ok(Self {
            tag,
            length,
            payload,
        })
    }
}
