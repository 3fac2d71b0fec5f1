#![doc = r#"
Channel voice message decoding.

A channel message is a status byte whose high nibble selects the message
kind (0x8..=0xE) and whose low nibble addresses one of sixteen channels,
followed by one or two 7-bit data bytes depending on the kind.
"#]

use crate::reader::{ReadResult, Reader};
use core::fmt;
use num_enum::TryFromPrimitive;

/// The status nibble of each channel voice message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum VoiceKind {
    /// 0x8: key released
    NoteOff = 0x8,
    /// 0x9: key pressed
    NoteOn = 0x9,
    /// 0xA: per-key aftertouch
    PolyphonicKeyPressure = 0xA,
    /// 0xB: controller moved
    ControlChange = 0xB,
    /// 0xC: patch selected
    ProgramChange = 0xC,
    /// 0xD: channel-wide aftertouch
    ChannelPressure = 0xD,
    /// 0xE: pitch wheel moved
    PitchBendChange = 0xE,
}

impl VoiceKind {
    /// How many data bytes follow the status byte for this kind.
    pub const fn data_byte_count(&self) -> usize {
        match self {
            Self::ProgramChange | Self::ChannelPressure => 1,
            _ => 2,
        }
    }
}

/// A decoded channel voice message, one variant per status nibble.
///
/// Data bytes are stored with their reserved high bit already masked off,
/// so every field holds a 7-bit value (pitch bend excepted, which combines
/// two of them).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum VoiceEvent {
    /// Key released.
    NoteOff {
        /// Which key, 0..=127 (middle C is 60).
        note_number: u8,
        /// Release velocity.
        key_velocity: u8,
    },
    /// Key pressed. A velocity of zero is conventionally a note off.
    NoteOn {
        /// Which key, 0..=127.
        note_number: u8,
        /// Strike velocity.
        key_velocity: u8,
    },
    /// Pressure applied to an already-held key.
    PolyphonicKeyPressure {
        /// Which key, 0..=127.
        note_number: u8,
        /// Pressure amount.
        key_velocity: u8,
    },
    /// A continuous controller changed value.
    ControlChange {
        /// Controller number, 0..=127.
        control_number: u8,
        /// New controller value.
        control_value: u8,
    },
    /// Patch selection for the channel.
    ProgramChange {
        /// Program (patch) number.
        program_number: u8,
    },
    /// Channel-wide aftertouch.
    ChannelPressure {
        /// Pressure amount.
        pressure_value: u8,
    },
    /// Pitch wheel position as a 14-bit value.
    ///
    /// The first data byte carries the least significant seven bits, the
    /// second the most significant seven. Center is 0x2000.
    PitchBendChange {
        /// Combined 14-bit wheel position.
        value: u16,
    },
    /// A status nibble outside 0x8..=0xE.
    ///
    /// Decoded generically so that decoding can continue: two data bytes
    /// are consumed and discarded, and the raw nibble is preserved.
    Unrecognized {
        /// The status nibble as read.
        status: u8,
    },
}

impl VoiceEvent {
    /// The status nibble this event was decoded from.
    pub const fn status_nibble(&self) -> u8 {
        match self {
            Self::NoteOff { .. } => 0x8,
            Self::NoteOn { .. } => 0x9,
            Self::PolyphonicKeyPressure { .. } => 0xA,
            Self::ControlChange { .. } => 0xB,
            Self::ProgramChange { .. } => 0xC,
            Self::ChannelPressure { .. } => 0xD,
            Self::PitchBendChange { .. } => 0xE,
            Self::Unrecognized { status } => *status,
        }
    }
}

impl fmt::Display for VoiceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoteOff { .. } => f.write_str("NoteOff"),
            Self::NoteOn { .. } => f.write_str("NoteOn"),
            Self::PolyphonicKeyPressure { .. } => f.write_str("PolyphonicKeyPressure"),
            Self::ControlChange { .. } => f.write_str("ControlChange"),
            Self::ProgramChange { .. } => f.write_str("ProgramChange"),
            Self::ChannelPressure { .. } => f.write_str("ChannelPressure"),
            Self::PitchBendChange { .. } => f.write_str("PitchBendChange"),
            Self::Unrecognized { status: 0xF } => f.write_str("SystemExclusive"),
            Self::Unrecognized { status } => write!(f, "Unrecognized(0x{status:X})"),
        }
    }
}

/// A channel voice message addressed to one of the sixteen channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChannelMessage {
    /// The channel the message addresses, one-based (1..=16).
    pub channel: u8,
    /// The decoded message body.
    pub message: VoiceEvent,
}

impl ChannelMessage {
    /// Decode the message body following `status`, which the caller has
    /// already consumed from `reader`.
    pub(crate) fn read(status: u8, reader: &mut Reader<'_>) -> ReadResult<Self> {
        let channel = (status & 0x0F) + 1;
        let nibble = status >> 4;

        let kind = VoiceKind::try_from(nibble).ok();
        // unknown kinds consume two data bytes, like every two-byte
        // voice message
        let data_bytes = kind.map_or(2, |k| k.data_byte_count());
        let data = reader.read_exact(data_bytes)?;
        // data bytes are 7-bit; the high bit is reserved
        let byte0 = data[0] & 0x7F;
        let byte1 = data.get(1).map_or(0, |b| b & 0x7F);

        let message = match kind {
            Some(VoiceKind::NoteOff) => VoiceEvent::NoteOff {
                note_number: byte0,
                key_velocity: byte1,
            },
            Some(VoiceKind::NoteOn) => VoiceEvent::NoteOn {
                note_number: byte0,
                key_velocity: byte1,
            },
            Some(VoiceKind::PolyphonicKeyPressure) => VoiceEvent::PolyphonicKeyPressure {
                note_number: byte0,
                key_velocity: byte1,
            },
            Some(VoiceKind::ControlChange) => VoiceEvent::ControlChange {
                control_number: byte0,
                control_value: byte1,
            },
            Some(VoiceKind::ProgramChange) => VoiceEvent::ProgramChange {
                program_number: byte0,
            },
            Some(VoiceKind::ChannelPressure) => VoiceEvent::ChannelPressure {
                pressure_value: byte0,
            },
            Some(VoiceKind::PitchBendChange) => VoiceEvent::PitchBendChange {
                // LSB first, then MSB
                value: u16::from(byte0) | (u16::from(byte1) << 7),
            },
            None => VoiceEvent::Unrecognized { status: nibble },
        };

        Ok(Self { channel, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(bytes: &[u8]) -> (ChannelMessage, usize) {
        let mut reader = Reader::from_byte_slice(bytes);
        let status = reader.read_byte().unwrap();
        let message = ChannelMessage::read(status, &mut reader).unwrap();
        (message, reader.buffer_position())
    }

    #[test]
    fn note_on_fields_and_channel() {
        let (msg, consumed) = decode(&[0x93, 0x3C, 0x40]);
        assert_eq!(msg.channel, 4);
        assert_eq!(
            msg.message,
            VoiceEvent::NoteOn {
                note_number: 60,
                key_velocity: 64
            }
        );
        assert_eq!(consumed, 3);
    }

    #[test]
    fn data_bytes_are_masked_to_seven_bits() {
        let (msg, _) = decode(&[0x80, 0xFF, 0xC1]);
        assert_eq!(
            msg.message,
            VoiceEvent::NoteOff {
                note_number: 0x7F,
                key_velocity: 0x41
            }
        );
    }

    #[test]
    fn program_change_consumes_a_single_data_byte() {
        let (msg, consumed) = decode(&[0xC0, 0x19, 0x55]);
        assert_eq!(msg.channel, 1);
        assert_eq!(msg.message, VoiceEvent::ProgramChange { program_number: 25 });
        assert_eq!(consumed, 2, "the trailing byte must be left unconsumed");
    }

    #[test]
    fn channel_pressure_consumes_a_single_data_byte() {
        let (msg, consumed) = decode(&[0xDF, 0x30]);
        assert_eq!(msg.channel, 16);
        assert_eq!(msg.message, VoiceEvent::ChannelPressure { pressure_value: 0x30 });
        assert_eq!(consumed, 2);
    }

    #[test]
    fn pitch_bend_is_fourteen_bit_lsb_first() {
        let (msg, consumed) = decode(&[0xE6, 0x77, 0x03]);
        assert_eq!(msg.channel, 7);
        assert_eq!(msg.message, VoiceEvent::PitchBendChange { value: 503 });
        assert_eq!(consumed, 3);
    }

    #[test]
    fn unknown_status_nibble_decodes_generically() {
        let (msg, consumed) = decode(&[0xF4, 0x01, 0x02]);
        assert_eq!(msg.channel, 5);
        assert_eq!(msg.message, VoiceEvent::Unrecognized { status: 0xF });
        assert_eq!(msg.message.to_string(), "SystemExclusive");
        assert_eq!(consumed, 3);
    }

    #[test]
    fn missing_data_bytes_is_eof() {
        let mut reader = Reader::from_byte_slice(&[0x40]);
        let err = ChannelMessage::read(0x90, &mut reader).unwrap_err();
        assert!(err.is_unexpected_eof());
    }

    #[test]
    fn display_matches_message_names() {
        let (msg, _) = decode(&[0xB2, 0x07, 0x64]);
        assert_eq!(msg.message.to_string(), "ControlChange");
        assert_eq!(msg.message.status_nibble(), 0xB);
    }
}
