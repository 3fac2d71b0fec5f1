use crate::{
    message::ChannelMessage,
    meta::MetaEvent,
    reader::{ReadResult, Reader},
};

/// A system-exclusive blob, carried through uninterpreted.
///
/// Both the `0xF0` form and the escaped `0xF7` form are read the same
/// way: a single length byte followed by that many raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SysexEvent<'a> {
    /// The raw payload, vendor-defined.
    pub data: &'a [u8],
}

impl<'a> SysexEvent<'a> {
    fn read(reader: &mut Reader<'a>) -> ReadResult<Self> {
        let length = reader.read_byte()?;
        let data = reader.read_exact(usize::from(length))?;
        Ok(Self { data })
    }
}

/// The body of a track event: a channel voice message, a meta event, or
/// a sysex blob.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TrackEventKind<'a> {
    /// A channel voice message.
    Channel(ChannelMessage),
    /// A meta event (`0xFF` prefix).
    Meta(MetaEvent<'a>),
    /// A system-exclusive blob (`0xF0`/`0xF7` prefix).
    Sysex(SysexEvent<'a>),
}

/// One delta-time-tagged event within a track.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrackEvent<'a> {
    /// Ticks since the previous event in the same track. Always relative,
    /// never cumulative.
    pub delta_time: u32,
    /// The decoded event body.
    pub event: TrackEventKind<'a>,
}

impl<'a> TrackEvent<'a> {
    /// Decode one event: a VLQ delta-time, then a body dispatched on its
    /// leading byte.
    pub(crate) fn read(reader: &mut Reader<'a>) -> ReadResult<Self> {
        let delta_time = reader.read_vlq()?;
        let status = reader.read_byte()?;
        let event = match status {
            0xFF => TrackEventKind::Meta(MetaEvent::read(reader)?),
            0xF0 | 0xF7 => TrackEventKind::Sysex(SysexEvent::read(reader)?),
            // any other byte is the status byte of a channel message
            _ => TrackEventKind::Channel(ChannelMessage::read(status, reader)?),
        };
        Ok(Self { delta_time, event })
    }
}

/// The ordered event list of one `MTrk` chunk.
///
/// Order is playback order and is preserved exactly as decoded. Running
/// status (reusing the previous status byte when a message omits its
/// own) is not implemented; a file relying on it decodes its statusless
/// messages generically rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Track<'a> {
    events: Vec<TrackEvent<'a>>,
}

impl<'a> Track<'a> {
    /// Decode a full `MTrk` payload into its event list.
    ///
    /// If the payload runs out mid-event the events decoded so far are
    /// kept and a warning is emitted; the truncation is not an error for
    /// the file as a whole. `payload_offset` is the payload's position in
    /// the enclosing buffer, used to report absolute offsets.
    pub(crate) fn read(payload: &'a [u8], payload_offset: usize) -> ReadResult<Self> {
        let mut body = Reader::from_byte_slice(payload);
        let mut events = Vec::new();
        while !body.is_empty() {
            match TrackEvent::read(&mut body) {
                Ok(event) => events.push(event),
                Err(err) if err.is_unexpected_eof() => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        "track payload ended mid-event at byte {}; keeping the {} complete events",
                        payload_offset + err.position(),
                        events.len(),
                    );
                    break;
                }
                Err(err) => return Err(err.rebase(payload_offset)),
            }
        }
        Ok(Self { events })
    }

    /// The events of the track, in decoded (playback) order.
    pub fn events(&self) -> &[TrackEvent<'a>] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::VoiceEvent;
    use crate::meta::MetaEventKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_events_in_order() {
        let payload = [
            0x00, 0x90, 0x3C, 0x40, // NoteOn c4
            0x60, 0x80, 0x3C, 0x00, // NoteOff after 96 ticks
            0x00, 0xFF, 0x2F, 0x00, // EndOfTrack
        ];
        let track = Track::read(&payload, 0).unwrap();
        let events = track.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].delta_time, 0);
        assert_eq!(events[1].delta_time, 96);
        let TrackEventKind::Channel(msg) = &events[0].event else {
            panic!("expected a channel message");
        };
        assert_eq!(
            msg.message,
            VoiceEvent::NoteOn {
                note_number: 60,
                key_velocity: 64
            }
        );
        let TrackEventKind::Meta(meta) = &events[2].event else {
            panic!("expected a meta event");
        };
        assert_eq!(meta.kind, MetaEventKind::EndOfTrack);
    }

    #[test]
    fn sysex_is_length_prefixed_raw_bytes() {
        let payload = [0x00, 0xF0, 0x03, 0x43, 0x12, 0x00];
        let track = Track::read(&payload, 0).unwrap();
        let TrackEventKind::Sysex(sysex) = &track.events()[0].event else {
            panic!("expected a sysex event");
        };
        assert_eq!(sysex.data, &[0x43, 0x12, 0x00]);

        // the escaped form reads identically
        let payload = [0x00, 0xF7, 0x01, 0x2A];
        let track = Track::read(&payload, 0).unwrap();
        let TrackEventKind::Sysex(sysex) = &track.events()[0].event else {
            panic!("expected a sysex event");
        };
        assert_eq!(sysex.data, &[0x2A]);
    }

    #[test]
    fn truncated_final_event_keeps_complete_ones() {
        let payload = [
            0x00, 0x90, 0x3C, 0x40, // complete NoteOn
            0x10, 0x91, 0x3E, // NoteOn cut off mid-data-byte
        ];
        let track = Track::read(&payload, 0).unwrap();
        assert_eq!(track.events().len(), 1);
    }

    #[test]
    fn empty_payload_is_an_empty_track() {
        let track = Track::read(&[], 0).unwrap();
        assert!(track.events().is_empty());
    }
}
