#![doc = r#"
Standard MIDI File decoding into plain inspectable values.

`smfparse` is a pure decoder: it takes a complete byte buffer and turns
it into the file's chunk sequence — header parameters, per-track event
lists, raw system-exclusive and vendor chunks. There is no encoding, no
playback, and no tempo-to-wallclock timing; the decoded tree is a plain
value for whatever tool sits on top (a JSON dumper, an inspector, a
sequencer frontend).

# Example

```
use smfparse::prelude::*;

let bytes = [
    // MThd: format 0, one track, 96 ticks per quarter note
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, //
    0x00, 0x00, 0x00, 0x01, 0x00, 0x60, //
    // MTrk: NoteOn, then EndOfTrack
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x08, //
    0x00, 0x90, 0x3C, 0x40, 0x00, 0xFF, 0x2F, 0x00,
];

let file = MidiFile::parse(&bytes)?;
assert_eq!(file.chunks().len(), 2);
assert_eq!(
    file.header().unwrap().division,
    Division::TicksPerQuarterNote(96)
);
assert_eq!(file.tracks()[0].events().len(), 2);
# Ok::<(), smfparse::reader::ReaderError>(())
```

# Features

- `tracing` (default): emit a `tracing::warn!` when a track payload ends
  mid-event (the decoder keeps the complete events and carries on).
- `serde`: derive `serde::Serialize` for every decoded type.
"#]

pub mod file;
pub mod message;
pub mod meta;
pub mod reader;

pub mod prelude;

pub use file::MidiFile;
