#![doc = r#"
Decoding a Standard MIDI File into a [`Score`]

```text
bytes ──► Chunks::locate ──► header chunk ──► Header::decode
                        └──► track chunks ──► TrackDecoder (× N) ──► merge ──► Score
```
"#]

pub mod chunk;
pub use chunk::{ChunkKind, Chunks, RawChunk};

mod format;
pub use format::*;

mod header;
pub use header::*;

mod meta;
pub use meta::*;

mod timing;
pub use timing::*;

mod track;
pub use track::*;

mod timed_notes;
pub use timed_notes::*;

use alloc::vec::Vec;

use crate::{Note, reader::ReadResult};

/// Decoding on the rayon pool only pays off past this many track bytes
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 16 * 1024;

#[doc = r#"
A decoded MIDI file: the header, every tempo and time signature change, and
the closed notes of each channel.

Tempo and time signature changes are concatenated in file order (track by
track). Each channel's notes are the concatenation of every track's notes on
that channel, keeping each track's internal order. Use the `timing` fields,
not the position in these lists, for musical ordering.
"#]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    header: Header,
    tempos: Vec<Tempo>,
    time_signatures: Vec<TimeSignature>,
    notes: ChannelNotes,
}

impl Score {
    /// Decode a complete file.
    ///
    /// Every located track chunk is decoded on its own slice. The first failing
    /// track, in file order, fails the whole decode.
    ///
    /// # Errors
    /// Any chunk layout error, or the first track decoding error. Error
    /// positions are offsets into `bytes`.
    pub fn decode(bytes: &[u8]) -> ReadResult<Self> {
        let chunks = Chunks::locate(bytes)?;
        let header = Header::decode(chunks.header().bytes())
            .map_err(|e| e.offset_by(chunks.header().offset()))?;
        chunks.expect_tracks(header.track_count())?;

        let tracks = decode_tracks(chunks.tracks())?;

        let mut score = Self::new(header);
        for track in tracks {
            score.merge(track);
        }
        Ok(score)
    }

    /// An empty score for `header`
    pub fn new(header: Header) -> Self {
        Self {
            header,
            tempos: Vec::new(),
            time_signatures: Vec::new(),
            notes: Default::default(),
        }
    }

    /// Append one track's events after those already in the score
    pub fn merge(&mut self, track: TrackData) {
        self.tempos.extend(track.tempos);
        self.time_signatures.extend(track.time_signatures);
        for (merged, notes) in self.notes.iter_mut().zip(track.notes) {
            merged.extend(notes);
        }
    }

    /// Returns header info
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Every tempo change, in file order
    pub fn tempos(&self) -> &[Tempo] {
        &self.tempos
    }

    /// Every time signature change, in file order
    pub fn time_signatures(&self) -> &[TimeSignature] {
        &self.time_signatures
    }

    /// Notes of all 16 channels
    pub fn notes(&self) -> &ChannelNotes {
        &self.notes
    }

    /// Notes of one channel, `None` if `channel` is not below [`CHANNEL_COUNT`](crate::CHANNEL_COUNT)
    pub fn channel(&self, channel: u8) -> Option<&[Note]> {
        self.notes.get(channel as usize).map(Vec::as_slice)
    }

    /// Every note, channel by channel
    pub fn iter_notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().flatten()
    }

    /// Total notes across all channels
    pub fn note_count(&self) -> usize {
        self.notes.iter().map(Vec::len).sum()
    }

    /// Tempo lookup and tick conversion for this score
    pub fn tempo_map(&self) -> TempoMap {
        TempoMap::new(self.header.division(), &self.tempos)
    }

    /// Active bpm at `tick`; 120 before the first tempo change
    pub fn bpm_at(&self, tick: u32) -> f64 {
        self.tempo_map().bpm_at(tick)
    }

    /// Every note with its start and end in microseconds
    pub fn timed_notes(&self) -> TimedNotes<'_> {
        TimedNotes::new(self.tempo_map(), &self.notes)
    }
}

fn decode_chunk(chunk: &RawChunk<'_>) -> ReadResult<TrackData> {
    TrackDecoder::new(chunk.bytes())
        .decode()
        .map_err(|e| e.offset_by(chunk.offset()))
}

fn decode_tracks(chunks: &[RawChunk<'_>]) -> ReadResult<Vec<TrackData>> {
    #[cfg(feature = "parallel")]
    {
        let total: usize = chunks.iter().map(|chunk| chunk.bytes().len()).sum();
        if chunks.len() > 1 && total >= PARALLEL_THRESHOLD {
            use rayon::prelude::*;

            // collect every outcome first so the reported error is the first in file order
            let results: Vec<ReadResult<TrackData>> = chunks.par_iter().map(decode_chunk).collect();
            return results.into_iter().collect();
        }
    }
    chunks.iter().map(decode_chunk).collect()
}
