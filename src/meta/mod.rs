#![doc = r#"
Meta event decoding.

Meta events are non-sounding, track-level annotations. On the wire they
follow a `0xFF` prefix (consumed by the track event dispatch) as a type
byte, a length byte, and `length` payload bytes. Unknown type codes are
not an error; their payload is carried through uninterpreted so that
files using newer or vendor-specific annotations still decode.
"#]

use crate::reader::{ReadResult, Reader};
use core::fmt;
use num_enum::FromPrimitive;

/// The type byte of each meta event defined by the SMF specification.
///
/// Codes outside the known set fold into [`Unknown`](Self::Unknown) with
/// the raw byte preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum MetaEventType {
    /// 0x00: sequence number
    SequenceNumber = 0x00,
    /// 0x01: free text
    Text = 0x01,
    /// 0x02: copyright notice
    CopyrightNotice = 0x02,
    /// 0x03: sequence/track name
    TrackName = 0x03,
    /// 0x04: instrument name
    InstrumentName = 0x04,
    /// 0x05: lyric
    Lyric = 0x05,
    /// 0x06: rehearsal/section marker
    Marker = 0x06,
    /// 0x07: cue point
    CuePoint = 0x07,
    /// 0x20: MIDI channel prefix
    MidiChannelPrefix = 0x20,
    /// 0x2F: end of track
    EndOfTrack = 0x2F,
    /// 0x51: tempo in microseconds per quarter note
    SetTempo = 0x51,
    /// 0x54: SMPTE offset
    SmpteOffset = 0x54,
    /// 0x58: time signature
    TimeSignature = 0x58,
    /// 0x59: key signature
    KeySignature = 0x59,
    /// 0x7F: sequencer-specific payload
    SequencerSpecific = 0x7F,
    /// Any other type code.
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// A decoded meta event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MetaEvent<'a> {
    /// The payload length the event declared. Always equals the number of
    /// payload bytes consumed, whatever the kind.
    pub length: u8,
    /// The decoded event body.
    pub kind: MetaEventKind<'a>,
}

/// The body of a meta event, one variant per known type code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MetaEventKind<'a> {
    /// Sequence number, big-endian 16-bit.
    SequenceNumber {
        /// The declared sequence number.
        sequence_number: u16,
    },
    /// Free text.
    Text(String),
    /// Copyright notice.
    CopyrightNotice(String),
    /// Sequence or track name.
    TrackName(String),
    /// Instrument name.
    InstrumentName(String),
    /// Lyric syllable.
    Lyric(String),
    /// Rehearsal or section marker.
    Marker(String),
    /// Cue point.
    CuePoint(String),
    /// Associates subsequent meta/sysex events with a channel.
    MidiChannelPrefix {
        /// The channel to associate, as stored.
        channel: u8,
    },
    /// Marks the end of the track. Carries no payload.
    EndOfTrack,
    /// Tempo change.
    SetTempo {
        /// Microseconds per quarter note, 24-bit big-endian.
        tempo: u32,
    },
    /// SMPTE starting time of the track.
    SmpteOffset {
        /// Hour byte, verbatim (includes the frame rate bits).
        hour: u8,
        /// Minutes.
        minute: u8,
        /// Seconds.
        second: u8,
        /// Frames.
        frame: u8,
        /// Fractional frames, in hundredths.
        subframe: u8,
    },
    /// Time signature.
    TimeSignature {
        /// Numerator.
        numerator: u8,
        /// Denominator as a power-of-two exponent (3 means 8).
        denominator: u8,
        /// MIDI clocks per metronome click.
        clocks_per_click: u8,
        /// Notated 32nd notes per MIDI quarter note.
        notated_32nds_per_quarter: u8,
    },
    /// Key signature.
    KeySignature {
        /// Flats (negative) or sharps (positive), two's complement.
        accidentals: i8,
        /// True for a minor key.
        minor: bool,
    },
    /// Sequencer-specific payload, uninterpreted.
    SequencerSpecific {
        /// The raw payload.
        data: &'a [u8],
    },
    /// A type code outside the known set.
    Unknown {
        /// The raw type byte.
        meta_type: u8,
        /// The raw payload.
        data: &'a [u8],
    },
}

impl<'a> MetaEvent<'a> {
    /// Decode a meta event. The `0xFF` prefix has already been consumed;
    /// `reader` is positioned at the type byte.
    pub(crate) fn read(reader: &mut Reader<'a>) -> ReadResult<Self> {
        let meta_type = reader.read_byte()?;
        let length = reader.read_byte()?;
        let payload_start = reader.buffer_position();
        let payload = reader.read_exact(usize::from(length))?;

        let kind = MetaEventKind::decode(meta_type, payload)
            .map_err(|e| e.rebase(payload_start))?;

        Ok(Self { length, kind })
    }

    /// The type byte this event was decoded from.
    pub const fn meta_type(&self) -> u8 {
        self.kind.meta_type()
    }
}

impl<'a> MetaEventKind<'a> {
    fn decode(meta_type: u8, payload: &'a [u8]) -> ReadResult<Self> {
        let mut body = Reader::from_byte_slice(payload);
        let kind = match MetaEventType::from(meta_type) {
            MetaEventType::SequenceNumber => Self::SequenceNumber {
                sequence_number: body.read_u16_be()?,
            },
            MetaEventType::Text => Self::Text(latin1(payload)),
            MetaEventType::CopyrightNotice => Self::CopyrightNotice(latin1(payload)),
            MetaEventType::TrackName => Self::TrackName(latin1(payload)),
            MetaEventType::InstrumentName => Self::InstrumentName(latin1(payload)),
            MetaEventType::Lyric => Self::Lyric(latin1(payload)),
            MetaEventType::Marker => Self::Marker(latin1(payload)),
            MetaEventType::CuePoint => Self::CuePoint(latin1(payload)),
            MetaEventType::MidiChannelPrefix => Self::MidiChannelPrefix {
                channel: body.read_byte()?,
            },
            MetaEventType::EndOfTrack => Self::EndOfTrack,
            MetaEventType::SetTempo => {
                let [high, mid, low] = body.read_exact_size()?;
                Self::SetTempo {
                    tempo: (u32::from(high) << 16) | (u32::from(mid) << 8) | u32::from(low),
                }
            }
            MetaEventType::SmpteOffset => {
                let [hour, minute, second, frame, subframe] = body.read_exact_size()?;
                Self::SmpteOffset {
                    hour,
                    minute,
                    second,
                    frame,
                    subframe,
                }
            }
            MetaEventType::TimeSignature => {
                let [numerator, denominator, clocks_per_click, notated_32nds_per_quarter] =
                    body.read_exact_size()?;
                Self::TimeSignature {
                    numerator,
                    denominator,
                    clocks_per_click,
                    notated_32nds_per_quarter,
                }
            }
            MetaEventType::KeySignature => {
                let [accidentals, minor] = body.read_exact_size()?;
                Self::KeySignature {
                    accidentals: accidentals as i8,
                    minor: minor != 0,
                }
            }
            MetaEventType::SequencerSpecific => Self::SequencerSpecific { data: payload },
            MetaEventType::Unknown(meta_type) => Self::Unknown {
                meta_type,
                data: payload,
            },
        };
        Ok(kind)
    }

    /// The type byte for this kind.
    pub const fn meta_type(&self) -> u8 {
        match self {
            Self::SequenceNumber { .. } => 0x00,
            Self::Text(_) => 0x01,
            Self::CopyrightNotice(_) => 0x02,
            Self::TrackName(_) => 0x03,
            Self::InstrumentName(_) => 0x04,
            Self::Lyric(_) => 0x05,
            Self::Marker(_) => 0x06,
            Self::CuePoint(_) => 0x07,
            Self::MidiChannelPrefix { .. } => 0x20,
            Self::EndOfTrack => 0x2F,
            Self::SetTempo { .. } => 0x51,
            Self::SmpteOffset { .. } => 0x54,
            Self::TimeSignature { .. } => 0x58,
            Self::KeySignature { .. } => 0x59,
            Self::SequencerSpecific { .. } => 0x7F,
            Self::Unknown { meta_type, .. } => *meta_type,
        }
    }
}

impl fmt::Display for MetaEventKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SequenceNumber { .. } => f.write_str("SequenceNumber"),
            Self::Text(_) => f.write_str("Text"),
            Self::CopyrightNotice(_) => f.write_str("CopyrightNotice"),
            Self::TrackName(_) => f.write_str("TrackName"),
            Self::InstrumentName(_) => f.write_str("InstrumentName"),
            Self::Lyric(_) => f.write_str("Lyric"),
            Self::Marker(_) => f.write_str("Marker"),
            Self::CuePoint(_) => f.write_str("CuePoint"),
            Self::MidiChannelPrefix { .. } => f.write_str("MIDIChannelPrefix"),
            Self::EndOfTrack => f.write_str("EndOfTrack"),
            Self::SetTempo { .. } => f.write_str("SetTempo"),
            Self::SmpteOffset { .. } => f.write_str("SMPTEOffset"),
            Self::TimeSignature { .. } => f.write_str("TimeSignature"),
            Self::KeySignature { .. } => f.write_str("KeySignature"),
            Self::SequencerSpecific { .. } => f.write_str("SequencerSpecific"),
            Self::Unknown { meta_type, .. } => write!(f, "Unknown(0x{meta_type:02X})"),
        }
    }
}

/// Meta event text is a sequence of single-byte characters, not
/// necessarily valid UTF-8; each byte maps to the code point of the same
/// value, so the conversion never fails.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
