#![doc = r#"
Decode Standard MIDI Files into a musical timeline.

A [`Score`](file::Score) holds everything a playback, visualisation or export layer needs
from a `.mid` file: the [`Header`](file::Header), every [`Tempo`](file::Tempo) and
[`TimeSignature`](file::TimeSignature)
change, and the closed [`Note`]s of each of the 16 MIDI channels.

# Example
```rust
use midi_score::prelude::*;

let bytes = [
    // MThd, length 6, format 0, one track, 480 ticks per quarter note
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x01, 0xE0,
    // MTrk, length 13
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x0D,
    0x00, 0x90, 0x3C, 0x64, // note on, C4
    0x83, 0x60, 0x80, 0x3C, 0x00, // 480 ticks later, note off
    0x00, 0xFF, 0x2F, 0x00, // end of track
];

let score = Score::decode(&bytes).unwrap();
let note = &score.channel(0).unwrap()[0];

assert_eq!(note.pitch_class, PitchClass::C);
assert_eq!(note.octave, Octave::new(4));
assert_eq!(note.duration, 480);
```

# Features
- `std` (default): implements `std::error::Error` for the error types.
- `parallel`: decodes track chunks on the `rayon` thread pool.
- `serde`: derives `Serialize`/`Deserialize` on the decoded structures.
- `tracing`: emits decoder diagnostics through `tracing`.
"#]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod error;
pub use error::*;

pub mod file;
pub mod message;
pub mod reader;

mod micros;
pub use micros::*;

mod note;
pub use note::*;

/// Number of MIDI channels. A channel number is always below this value.
pub const CHANNEL_COUNT: usize = 16;

/// Decode a complete Standard MIDI File.
///
/// Shorthand for [`Score::decode`](file::Score::decode).
pub fn decode(bytes: &[u8]) -> reader::ReadResult<file::Score> {
    file::Score::decode(bytes)
}

/// Commonly used types
pub mod prelude {
    pub use crate::{
        CHANNEL_COUNT, decode,
        error::*,
        file::{
            ChannelNotes, ChunkKind, Chunks, FormatType, Header, RawChunk, Score, TempoMap,
            TimeSignature, TimedNote, TimedNotes, Tempo, TrackData, TrackDecoder,
        },
        message::{Status, channel::VoiceKind},
        micros::*,
        note::*,
        reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
    };
}
