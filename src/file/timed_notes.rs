use core::slice;

use super::{ChannelNotes, TempoMap};
use crate::{Note, UMicros};

/// A note placed in absolute time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedNote<'a> {
    /// The decoded note
    pub note: &'a Note,
    /// Time of the note-on
    pub start: UMicros,
    /// Time of the note-off
    pub end: UMicros,
}

impl TimedNote<'_> {
    /// How long the note sounds
    pub fn duration(&self) -> UMicros {
        self.end.saturating_sub(self.start)
    }

    /// Note-on velocity scaled to `0.0..=1.0`.
    ///
    /// No master volume is applied; a player scales this to its own output level.
    pub fn gain(&self) -> f64 {
        self.note.velocity.min(127) as f64 / 127.
    }
}

/// An iterator returned from [`Score::timed_notes`](super::Score::timed_notes).
///
/// Yields channel 0's notes first, then channel 1's, and so on.
pub struct TimedNotes<'a> {
    tempo_map: TempoMap,
    channels: slice::Iter<'a, alloc::vec::Vec<Note>>,
    current: slice::Iter<'a, Note>,
    len_remaining: usize,
}

impl<'a> TimedNotes<'a> {
    pub(super) fn new(tempo_map: TempoMap, notes: &'a ChannelNotes) -> Self {
        let len_remaining = notes.iter().map(|channel| channel.len()).sum();
        Self {
            tempo_map,
            channels: notes.iter(),
            current: Default::default(),
            len_remaining,
        }
    }
}

impl<'a> Iterator for TimedNotes<'a> {
    type Item = TimedNote<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        let note = loop {
            match self.current.next() {
                Some(note) => break note,
                None => self.current = self.channels.next()?.iter(),
            }
        };
        self.len_remaining -= 1;
        Some(TimedNote {
            note,
            start: self.tempo_map.micros_at(note.timing),
            end: self.tempo_map.micros_at(note.end()),
        })
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len_remaining, Some(self.len_remaining))
    }
}

impl ExactSizeIterator for TimedNotes<'_> {}
