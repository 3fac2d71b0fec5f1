use pretty_assertions::assert_eq;
use smfparse::prelude::*;

/// MThd (format 0, one track, 96 tpqn) followed by an MTrk holding a
/// NoteOn at delta-time 0 and an EndOfTrack.
const MINIMAL: &[u8] = &[
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, //
    0x00, 0x00, 0x00, 0x01, 0x00, 0x60, //
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x08, //
    0x00, 0x90, 0x3C, 0x40, 0x00, 0xFF, 0x2F, 0x00,
];

#[test]
fn minimal_file_end_to_end() {
    let file = MidiFile::parse(MINIMAL).unwrap();
    assert_eq!(file.chunks().len(), 2);

    let header = file.header().expect("an MThd chunk");
    assert_eq!(header.format, 0);
    assert_eq!(header.num_tracks, 1);
    assert_eq!(header.division, Division::TicksPerQuarterNote(96));

    assert_eq!(file.chunks()[0].tag, ChunkTag::HEADER);
    assert_eq!(file.chunks()[0].length, 6);
    assert_eq!(file.chunks()[1].tag, ChunkTag::TRACK);
    assert_eq!(file.chunks()[1].length, 8);

    let tracks = file.tracks();
    assert_eq!(tracks.len(), 1);
    let events = tracks[0].events();
    assert_eq!(events.len(), 2);

    let TrackEventKind::Channel(msg) = &events[0].event else {
        panic!("first event should be a channel message");
    };
    assert_eq!(msg.channel, 1);
    assert_eq!(
        msg.message,
        VoiceEvent::NoteOn {
            note_number: 60,
            key_velocity: 64
        }
    );

    let TrackEventKind::Meta(meta) = &events[1].event else {
        panic!("second event should be a meta event");
    };
    assert_eq!(meta.kind, MetaEventKind::EndOfTrack);
}

#[test]
fn decoding_is_idempotent() {
    let first = MidiFile::parse(MINIMAL).unwrap();
    let second = MidiFile::parse(MINIMAL).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_input_decodes_to_zero_chunks() {
    let file = MidiFile::parse(&[]).unwrap();
    assert!(file.chunks().is_empty());
    assert!(file.header().is_none());
    assert!(file.tracks().is_empty());
}

#[test]
fn chunk_order_is_preserved_and_unvalidated() {
    // a vendor chunk first, then the header: accepted as-is
    let mut bytes = vec![
        b'T', b'E', b'S', b'T', 0x00, 0x00, 0x00, 0x02, 0x01, 0x02,
    ];
    bytes.extend_from_slice(MINIMAL);

    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.chunks().len(), 3);
    assert_eq!(file.chunks()[0].tag.to_string(), "TEST");
    assert_eq!(
        file.chunks()[0].payload,
        ChunkPayload::Unknown(&[0x01, 0x02])
    );
    // header() still finds the MThd even though it is not first
    assert_eq!(file.header().unwrap().num_tracks, 1);
}

#[test]
fn truncated_chunk_header_is_fatal() {
    let mut bytes = MINIMAL.to_vec();
    // bump the track chunk's declared length past the end of the buffer
    bytes[21] = 0xFF;

    let err = MidiFile::parse(&bytes).unwrap_err();
    let ReaderErrorKind::TruncatedChunk {
        declared,
        remaining,
    } = *err.kind()
    else {
        panic!("expected TruncatedChunk, got {err}");
    };
    assert_eq!(declared, 0xFF);
    assert_eq!(remaining, 8);
    assert_eq!(err.position(), 22);
}

#[test]
fn track_cut_off_mid_event_is_not_fatal_for_the_file() {
    let bytes = [
        // header
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, //
        0x00, 0x00, 0x00, 0x02, 0x00, 0x60, //
        // first track: one complete NoteOn, one cut off mid-data-byte
        0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x07, //
        0x00, 0x90, 0x3C, 0x40, 0x00, 0x91, 0x3E, //
        // second track still decodes
        0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04, //
        0x00, 0xFF, 0x2F, 0x00,
    ];

    let file = MidiFile::parse(&bytes).unwrap();
    let tracks = file.tracks();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].events().len(), 1, "only the complete event kept");
    assert_eq!(tracks[1].events().len(), 1);
    // the chunk's declared length is still what was consumed
    assert_eq!(file.chunks()[1].length, 7);
}

#[test]
fn smpte_division_header() {
    let bytes = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, //
        0x00, 0x00, 0x00, 0x00, 0xE7, 0x28,
    ];
    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(
        file.header().unwrap().division,
        Division::Smpte {
            format: 0x67,
            ticks_per_frame: 40
        }
    );
}

#[test]
fn mixed_track_with_meta_sysex_and_messages() {
    let track_data: &[u8] = &[
        0x00, 0xFF, 0x03, 0x04, b'L', b'e', b'a', b'd', // TrackName "Lead"
        0x00, 0xC0, 0x51, // ProgramChange 81
        0x00, 0xF0, 0x02, 0x7E, 0x09, // sysex blob
        0x10, 0xE6, 0x77, 0x03, // PitchBend
        0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // SetTempo 500000
        0x00, 0xFF, 0x2F, 0x00, // EndOfTrack
    ];
    let mut bytes = vec![b'M', b'T', b'r', b'k', 0, 0, 0, track_data.len() as u8];
    bytes.extend_from_slice(track_data);

    let file = MidiFile::parse(&bytes).unwrap();
    let tracks = file.tracks();
    let events = tracks[0].events();
    assert_eq!(events.len(), 6);

    let TrackEventKind::Meta(name) = &events[0].event else {
        panic!()
    };
    assert_eq!(name.kind, MetaEventKind::TrackName("Lead".into()));

    let TrackEventKind::Sysex(sysex) = &events[2].event else {
        panic!()
    };
    assert_eq!(sysex.data, &[0x7E, 0x09]);

    let TrackEventKind::Channel(bend) = &events[3].event else {
        panic!()
    };
    assert_eq!(bend.channel, 7);
    assert_eq!(bend.message, VoiceEvent::PitchBendChange { value: 503 });
    assert_eq!(events[3].delta_time, 16);

    let TrackEventKind::Meta(tempo) = &events[4].event else {
        panic!()
    };
    assert_eq!(tempo.kind, MetaEventKind::SetTempo { tempo: 500_000 });
}

#[test]
fn errors_format_with_their_offset() {
    // header chunk that claims 6 bytes but the buffer ends after 3
    let bytes = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00,
    ];
    let err = MidiFile::parse(&bytes).unwrap_err();
    let rendered = err.to_string();
    assert!(
        rendered.contains("byte 8"),
        "error should name the offset: {rendered}"
    );
}
