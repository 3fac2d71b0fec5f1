use crate::reader::{ReadResult, Reader};

/// How delta-times in the file's tracks are to be interpreted, selected
/// by bit 15 of the header's division word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Division {
    /// Metrical timing: delta-time ticks subdivide a quarter note.
    TicksPerQuarterNote(u16),
    /// Timecode timing: delta-time ticks subdivide an SMPTE frame.
    Smpte {
        /// The SMPTE format bits, as stored (low seven bits of the high
        /// byte of the division word).
        format: u8,
        /// Ticks per frame.
        ticks_per_frame: u8,
    },
}

/// The decoded fields of an `MThd` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeaderChunk {
    /// SMF format: 0 (single track), 1 (simultaneous tracks) or
    /// 2 (independent tracks). Stored as declared, not validated.
    pub format: u16,
    /// The number of `MTrk` chunks the file claims to contain. Not
    /// checked against the chunks actually present.
    pub num_tracks: u16,
    /// Delta-time interpretation for every track.
    pub division: Division,
}

impl HeaderChunk {
    /// Decode the first six payload bytes of an `MThd` chunk. Any extra
    /// payload bytes are ignored; the chunk's declared length governs how
    /// many were consumed. `payload_offset` is the payload's position in
    /// the enclosing buffer.
    pub(crate) fn read(payload: &[u8], payload_offset: usize) -> ReadResult<Self> {
        let mut body = Reader::from_byte_slice(payload);
        Self::read_fields(&mut body).map_err(|e| e.rebase(payload_offset))
    }

    fn read_fields(body: &mut Reader<'_>) -> ReadResult<Self> {
        let format = body.read_u16_be()?;
        let num_tracks = body.read_u16_be()?;
        let [high, low] = body.read_exact_size()?;
        let division = if high >> 7 == 0 {
            Division::TicksPerQuarterNote((u16::from(high & 0x7F) << 8) | u16::from(low))
        } else {
            Division::Smpte {
                format: high & 0x7F,
                ticks_per_frame: low,
            }
        };
        Ok(Self {
            format,
            num_tracks,
            division,
        })
    }
}
