#![doc = r#"
Convenient re-export of the common types.

```
use smfparse::prelude::*;
```
"#]

pub use crate::{
    file::{
        Chunk, ChunkPayload, ChunkTag, Division, HeaderChunk, MidiFile, SysexEvent, Track,
        TrackEvent, TrackEventKind,
    },
    message::{ChannelMessage, VoiceEvent, VoiceKind},
    meta::{MetaEvent, MetaEventKind, MetaEventType},
    reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
};
