#![doc = r#"
Rusty representation of a decoded [`MidiFile`]
"#]

mod chunk;
pub use chunk::*;

mod header;
pub use header::*;

mod track;
pub use track::*;

use crate::reader::{ReadResult, Reader};

#[doc = r#"
A fully decoded Standard MIDI File: the ordered sequence of its chunks.

Decoding accepts any sequence of well-formed chunks; it does not insist
that the first chunk is an `MThd` header, nor that the number of `MTrk`
chunks matches the header's declared track count. The
[`header`](Self::header) and [`tracks`](Self::tracks) accessors pick the
interpreted chunks out of the sequence.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MidiFile<'a> {
    chunks: Vec<Chunk<'a>>,
}

impl<'a> MidiFile<'a> {
    /// Decode a byte buffer into a file struct.
    ///
    /// Decoding is a pure function of the buffer: it borrows the bytes,
    /// mutates nothing, and the same input always produces the same
    /// result. Errors carry the byte offset at which decoding failed.
    pub fn parse(bytes: &'a [u8]) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let mut chunks = Vec::new();
        while !reader.is_empty() {
            chunks.push(Chunk::read(&mut reader)?);
        }
        Ok(Self { chunks })
    }

    /// Every chunk of the file, in file order.
    pub fn chunks(&self) -> &[Chunk<'a>] {
        &self.chunks
    }

    /// The first `MThd` chunk, if the file has one.
    pub fn header(&self) -> Option<&HeaderChunk> {
        self.chunks.iter().find_map(|chunk| match &chunk.payload {
            ChunkPayload::Header(header) => Some(header),
            _ => None,
        })
    }

    /// The `MTrk` chunks, in file order.
    pub fn tracks(&self) -> Vec<&Track<'a>> {
        self.chunks
            .iter()
            .filter_map(|chunk| match &chunk.payload {
                ChunkPayload::Track(track) => Some(track),
                _ => None,
            })
            .collect()
    }

    /// Executes the provided function for every track in file order.
    ///
    /// Useful if you don't want to collect the track list.
    pub fn for_each_track<F>(&self, func: F)
    where
        F: FnMut(&Track<'a>),
    {
        self.chunks
            .iter()
            .filter_map(|chunk| match &chunk.payload {
                ChunkPayload::Track(track) => Some(track),
                _ => None,
            })
            .for_each(func);
    }
}
