#![doc = r#"
Decoding a track chunk's event stream

A track chunk is a sequence of events, each preceded by a variable-length
delta-time:

```text
[ "MTrk" | length ] ( delta-time status payload )* ... 00 FF 2F 00
```

The decoder keeps an absolute tick position, adds every delta-time to it, and
dispatches on the status byte. Every event's payload is consumed in full,
whether or not the decoder uses it: one mis-sized read would shift every
following event of the track.

Note-ons are held as open notes until a note-off (or a note-on with zero
velocity) on the same channel and pitch closes them. Notes still open at the
end of the track are discarded.

Running status (omitting a repeated status byte) is not supported. Such data
bytes are treated as status bytes without payload, which desynchronizes the
rest of the track.
"#]
mod open_notes;
use open_notes::{OpenNote, OpenNotes};

use core::ops::ControlFlow;

use alloc::vec::Vec;

use super::{
    MetaTag, TimeSignature,
    chunk::CHUNK_PREFIX_LEN,
    timing::Tempo,
};
use crate::{
    CHANNEL_COUNT, Note, Pitch,
    message::{Status, channel::VoiceKind},
    reader::{ReadResult, Reader, ReaderError},
};

/// Notes grouped by channel, indexed by channel number
pub type ChannelNotes = [Vec<Note>; CHANNEL_COUNT];

/// Everything one track chunk contributes to a [`Score`](super::Score)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackData {
    /// Tempo changes, in track order
    pub tempos: Vec<Tempo>,
    /// Time signature changes, in track order
    pub time_signatures: Vec<TimeSignature>,
    /// Closed notes per channel, in the order they were closed
    pub notes: ChannelNotes,
    /// Note-ons that were never closed before the end of the track
    pub unclosed_notes: usize,
}

impl TrackData {
    /// Total closed notes across all channels
    pub fn note_count(&self) -> usize {
        self.notes.iter().map(Vec::len).sum()
    }
}

#[doc = r#"
Decodes one track chunk.

# Example
```rust
# use midi_score::prelude::*;
let chunk = [
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x0B,
    0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // tempo, 500000 µs per quarter
    0x00, 0xFF, 0x2F, 0x00,
];
let track = TrackDecoder::new(&chunk).decode().unwrap();

assert_eq!(track.tempos[0].bpm, 120.);
assert_eq!(track.note_count(), 0);
```
"#]
pub struct TrackDecoder<'slc> {
    reader: Reader<'slc>,
    tick: u32,
    open_notes: OpenNotes,
    track: TrackData,
}

impl<'slc> TrackDecoder<'slc> {
    /// Prepare to decode `chunk`, which must include the 8-byte chunk prefix.
    pub fn new(chunk: &'slc [u8]) -> Self {
        Self {
            reader: Reader::from_byte_slice(chunk),
            tick: 0,
            open_notes: OpenNotes::default(),
            track: TrackData::default(),
        }
    }

    /// Decode events until the end-of-track meta event.
    ///
    /// # Errors
    /// - [`TrackError::Truncated`](crate::TrackError::Truncated) if the chunk
    ///   ends on an event boundary without an end-of-track event
    /// - [`ReaderErrorKind::OutOfBounds`](crate::reader::ReaderErrorKind::OutOfBounds)
    ///   if an event runs past the end of the chunk
    ///
    /// Positions in the returned error are relative to the start of `chunk`.
    pub fn decode(mut self) -> ReadResult<TrackData> {
        self.reader.skip(CHUNK_PREFIX_LEN)?;

        loop {
            if self.reader.is_empty() {
                return Err(ReaderError::truncated_track(self.reader.buffer_position()));
            }
            let delta = self.reader.read_vlq()?;
            self.tick = self.tick.saturating_add(delta);

            let flow = match Status::from(self.reader.read_u8()?) {
                Status::Meta => self.read_meta()?,
                Status::SystemExclusive => {
                    let len = self.reader.read_vlq()?;
                    self.reader.skip(len as usize)?;
                    ControlFlow::Continue(())
                }
                Status::ChannelVoice { kind, channel } => {
                    self.read_voice(kind, channel)?;
                    ControlFlow::Continue(())
                }
                Status::Unsupported(_byte) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        position = self.reader.buffer_position() - 1,
                        "unsupported status byte {_byte:#04X}, decoding continues without payload"
                    );
                    ControlFlow::Continue(())
                }
            };
            if flow.is_break() {
                break;
            }
        }

        self.track.unclosed_notes = self.open_notes.len();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            tick = self.tick,
            tempos = self.track.tempos.len(),
            time_signatures = self.track.time_signatures.len(),
            notes = self.track.note_count(),
            discarded = self.track.unclosed_notes,
            "decoded track"
        );
        self.open_notes.clear();

        Ok(self.track)
    }

    fn read_meta(&mut self) -> ReadResult<ControlFlow<()>> {
        let tag = self.reader.read_u8()?;
        match MetaTag::try_from(tag) {
            Ok(MetaTag::EndOfTrack) => return Ok(ControlFlow::Break(())),
            Ok(MetaTag::Tempo) => {
                let _len = self.reader.read_u8()?;
                let micros = self.reader.read_u24_be()?;
                self.track
                    .tempos
                    .push(Tempo::from_micros_per_quarter_note(micros, self.tick));
            }
            Ok(MetaTag::TimeSignature) => {
                let _len = self.reader.read_u8()?;
                // clocks per click and 32nds per quarter are consumed but unused
                let [numerator, exponent, _clocks, _32nds] = self.reader.read_exact_size()?;
                self.track.time_signatures.push(TimeSignature::from_exponent(
                    numerator, exponent, self.tick,
                ));
            }
            Ok(tag) => match tag.fixed_len() {
                Some(len) => self.reader.skip(len)?,
                None => self.skip_prefixed()?,
            },
            Err(_) => self.skip_prefixed()?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn skip_prefixed(&mut self) -> ReadResult<()> {
        let len = self.reader.read_vlq()?;
        self.reader.skip(len as usize)
    }

    fn read_voice(&mut self, kind: VoiceKind, channel: u8) -> ReadResult<()> {
        match kind {
            VoiceKind::NoteOn => {
                let [key, velocity] = self.reader.read_exact_size()?;
                if velocity == 0 {
                    self.close_note(channel, key);
                } else {
                    self.open_notes.open(OpenNote {
                        pitch: Pitch::new(key),
                        timing: self.tick,
                        velocity,
                        channel,
                    });
                }
            }
            VoiceKind::NoteOff => {
                let [key, _release] = self.reader.read_exact_size()?;
                self.close_note(channel, key);
            }
            other => self.reader.skip(other.payload_len())?,
        }
        Ok(())
    }

    fn close_note(&mut self, channel: u8, key: u8) {
        match self.open_notes.close(channel, Pitch::new(key), self.tick) {
            Some(note) => self.track.notes[channel as usize].push(note),
            None => {
                #[cfg(feature = "tracing")]
                tracing::trace!(channel, key, tick = self.tick, "note-off without note-on");
            }
        }
    }
}
