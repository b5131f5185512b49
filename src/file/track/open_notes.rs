use alloc::vec::Vec;

use crate::{Note, Pitch};

/// A note-on still waiting for its note-off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenNote {
    pub pitch: Pitch,
    pub timing: u32,
    pub velocity: u8,
    pub channel: u8,
}

/// Sounding notes of one track, oldest first.
///
/// Closing searches linearly for the oldest entry on the same channel and
/// pitch, so repeated note-ons of one pitch close first-in, first-out.
#[derive(Debug, Default)]
pub(crate) struct OpenNotes {
    notes: Vec<OpenNote>,
}

impl OpenNotes {
    pub fn open(&mut self, note: OpenNote) {
        self.notes.push(note);
    }

    /// Close the oldest matching note at `tick`.
    ///
    /// `None` if nothing on `channel` is sounding `pitch`.
    pub fn close(&mut self, channel: u8, pitch: Pitch, tick: u32) -> Option<Note> {
        let idx = self
            .notes
            .iter()
            .position(|open| open.channel == channel && open.pitch == pitch)?;
        let open = self.notes.remove(idx);

        Some(Note {
            pitch_class: pitch.pitch_class(),
            octave: pitch.octave(),
            timing: open.timing,
            duration: tick - open.timing,
            velocity: open.velocity,
            channel,
        })
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Drop every unclosed note
    pub fn clear(&mut self) {
        self.notes.clear();
    }
}

#[test]
fn closes_oldest_first() {
    let pitch = Pitch::new(60);
    let mut notes = OpenNotes::default();
    notes.open(OpenNote {
        pitch,
        timing: 0,
        velocity: 10,
        channel: 0,
    });
    notes.open(OpenNote {
        pitch,
        timing: 5,
        velocity: 20,
        channel: 0,
    });

    let first = notes.close(0, pitch, 7).unwrap();
    assert_eq!((first.timing, first.duration, first.velocity), (0, 7, 10));
    let second = notes.close(0, pitch, 9).unwrap();
    assert_eq!((second.timing, second.duration, second.velocity), (5, 4, 20));
    assert_eq!(notes.close(0, pitch, 9), None);
}

#[test]
fn match_requires_same_channel_and_pitch() {
    let mut notes = OpenNotes::default();
    notes.open(OpenNote {
        pitch: Pitch::new(60),
        timing: 0,
        velocity: 10,
        channel: 1,
    });

    assert_eq!(notes.close(0, Pitch::new(60), 3), None);
    assert_eq!(notes.close(1, Pitch::new(72), 3), None);
    assert_eq!(notes.len(), 1);
    assert!(notes.close(1, Pitch::new(60), 3).is_some());
    assert_eq!(notes.len(), 0);
}
