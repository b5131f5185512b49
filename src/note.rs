use core::fmt;

#[doc = r#"
Identifies a MIDI note number.

Note numbers are 7-bit. Each value corresponds to some [`PitchClass`] and [`Octave`]:
[`Pitch`] `0` is `C(-1)`, [`Pitch`] `60` is `C4` and [`Pitch`] `127` is `G9`.

# Example
```rust
# use midi_score::prelude::*;

let pitch = Pitch::new(63);

assert_eq!(pitch.pitch_class(), PitchClass::DSharp);
assert_eq!(pitch.octave(), Octave::new(4));
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pitch(u8);

impl Pitch {
    /// Middle A, tuned to [`Pitch::A4_FREQUENCY`].
    pub const A4: Pitch = Pitch(69);

    /// Reference frequency of [`Pitch::A4`] in Hz.
    pub const A4_FREQUENCY: f64 = 440.;

    /// Create a pitch from a note number. The top bit is discarded.
    pub const fn new(byte: u8) -> Self {
        Self(byte & 0x7F)
    }

    /// Create a pitch from a pitch class and octave.
    ///
    /// Returns `None` if the combination is outside `C(-1)..=G9`.
    pub const fn from_parts(pitch_class: PitchClass, octave: Octave) -> Option<Self> {
        let value = (octave.value() as i16 + 1) * 12 + pitch_class.semitone() as i16;
        if value < 0 || value > 127 {
            return None;
        }
        Some(Self(value as u8))
    }

    /// Identifies the pitch class of the note
    #[inline]
    pub const fn pitch_class(&self) -> PitchClass {
        PitchClass::from_semitone(self.0 % 12)
    }

    /// Identifies the octave of the note
    #[inline]
    pub const fn octave(&self) -> Octave {
        Octave((self.0 / 12) as i8 - 1)
    }

    /// Returns the underlying note number
    pub const fn byte(&self) -> u8 {
        self.0
    }

    /// Equal-tempered frequency in Hz, relative to `A4 = 440 Hz`.
    ///
    /// ```rust
    /// # use midi_score::prelude::*;
    /// assert_eq!(Pitch::A4.frequency(), 440.);
    /// assert_eq!(Pitch::new(81).frequency(), 880.);
    /// assert!((Pitch::new(60).frequency() - 261.6256).abs() < 1e-4);
    /// ```
    pub fn frequency(&self) -> f64 {
        let semitones = self.0 as i32 - Self::A4.0 as i32;
        let octaves = semitones.div_euclid(12);
        let step = semitones.rem_euclid(12) as usize;

        let mut freq = Self::A4_FREQUENCY * SEMITONE_RATIOS[step];
        if octaves >= 0 {
            for _ in 0..octaves {
                freq *= 2.;
            }
        } else {
            for _ in octaves..0 {
                freq /= 2.;
            }
        }
        freq
    }
}

/// `2^(n/12)` for `n` in `0..12`
const SEMITONE_RATIOS: [f64; 12] = [
    1.0,
    1.059_463_094_359_295_3,
    1.122_462_048_309_373,
    1.189_207_115_002_721,
    1.259_921_049_894_873_2,
    1.334_839_854_170_034_4,
    core::f64::consts::SQRT_2,
    1.498_307_076_876_681_5,
    1.587_401_051_968_199_5,
    1.681_792_830_507_429,
    1.781_797_436_280_678_6,
    1.887_748_625_363_386_9,
];

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class(), self.octave())
    }
}

impl From<u8> for Pitch {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[doc = r#"
One of the twelve semitone names of the chromatic scale.

# Example
```rust
# use midi_score::prelude::*;

assert_eq!(PitchClass::FSharp.name(), "F#");
assert_eq!(PitchClass::FSharp.to_string(), "F#");
```
"#]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// Returns an array beginning with [`PitchClass::C`] to [`PitchClass::B`]
    pub const fn all() -> [PitchClass; 12] {
        use PitchClass::*;
        [C, CSharp, D, DSharp, E, F, FSharp, G, GSharp, A, ASharp, B]
    }

    /// Returns true if the pitch class is sharp.
    ///
    /// ```rust
    /// # use midi_score::prelude::*;
    /// assert!(!PitchClass::C.is_sharp());
    /// assert!(PitchClass::FSharp.is_sharp());
    /// ```
    #[inline]
    pub const fn is_sharp(&self) -> bool {
        use PitchClass::*;
        matches!(self, CSharp | DSharp | FSharp | GSharp | ASharp)
    }

    /// The pitch class `semitone % 12` steps above C.
    pub const fn from_semitone(semitone: u8) -> Self {
        Self::all()[(semitone % 12) as usize]
    }

    /// Semitones above C, `0..12`
    pub const fn semitone(&self) -> u8 {
        *self as u8
    }

    /// The semitone name, using sharps
    pub const fn name(&self) -> &'static str {
        use PitchClass::*;
        match self {
            C => "C",
            CSharp => "C#",
            D => "D",
            DSharp => "D#",
            E => "E",
            F => "F",
            FSharp => "F#",
            G => "G",
            GSharp => "G#",
            A => "A",
            ASharp => "A#",
            B => "B",
        }
    }

    /// Create a [`Pitch`] given this pitch class and a provided [`Octave`]
    pub const fn with_octave(self, octave: Octave) -> Option<Pitch> {
        Pitch::from_parts(self, octave)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[doc = r#"
Identifies the octave of a [`Pitch`]. Decoded values range from -1 to 9.

# Example

```rust
# use midi_score::prelude::*;

let octave = Octave::new(12); // clamps to 9

assert_eq!(octave.value(), 9);
```
"#]
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Octave(i8);

impl Octave {
    /// Should be a value between [-1, 9]. Clamps between these two values.
    pub const fn new(mut octave: i8) -> Self {
        if octave < -1 {
            octave = -1
        } else if octave > 9 {
            octave = 9;
        }
        Self(octave)
    }

    /// The octave, from `[-1,9]`
    pub const fn value(&self) -> i8 {
        self.0
    }
}

impl fmt::Display for Octave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[doc = r#"
A note on the decoded timeline.

Notes only exist once a note-off (or a zero-velocity note-on) has closed a
note-on on the same channel and pitch, so `duration` is always known.
Timings and durations are in ticks; see [`Header::division`](crate::file::Header::division).
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// Semitone name of the note
    pub pitch_class: PitchClass,
    /// Octave of the note, `C4` being middle C
    pub octave: Octave,
    /// Absolute tick of the note-on
    pub timing: u32,
    /// Ticks between the note-on and the note-off that closed it
    pub duration: u32,
    /// Note-on velocity
    pub velocity: u8,
    /// Channel, `0..16`
    pub channel: u8,
}

impl Note {
    /// The note number this note was decoded from.
    ///
    /// Decoded notes always map to a note number. A hand-built note whose
    /// pitch class and octave lie above `G9` has none and yields
    /// [`Pitch::A4`] instead, so check [`Pitch::from_parts`] first when
    /// building notes by hand.
    pub fn pitch(&self) -> Pitch {
        Pitch::from_parts(self.pitch_class, self.octave).unwrap_or(Pitch::A4)
    }

    /// Absolute tick of the note-off
    pub const fn end(&self) -> u32 {
        self.timing.saturating_add(self.duration)
    }

    /// Equal-tempered frequency in Hz
    pub fn frequency(&self) -> f64 {
        self.pitch().frequency()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} @{}+{} vel {} ch {}",
            self.pitch_class, self.octave, self.timing, self.duration, self.velocity, self.channel
        )
    }
}

#[test]
fn pitch_from_note_numbers() {
    let c = Pitch::new(12);
    assert_eq!(PitchClass::C, c.pitch_class());
    assert_eq!(0, c.octave().value());

    let a_sharp = Pitch::new(94);
    assert_eq!(PitchClass::ASharp, a_sharp.pitch_class());
    assert_eq!(6, a_sharp.octave().value());

    let lowest = Pitch::new(0);
    assert_eq!(alloc::format!("{lowest}"), "C-1");

    let highest = Pitch::new(127);
    assert_eq!(alloc::format!("{highest}"), "G9");
}

#[test]
fn pitch_masks_top_bit() {
    assert_eq!(Pitch::new(0x80 | 60), Pitch::new(60));
}

#[test]
fn pitch_from_class_octave_pairs() {
    for byte in 0..128 {
        let pitch = Pitch::new(byte);
        let rebuilt = Pitch::from_parts(pitch.pitch_class(), pitch.octave());
        assert_eq!(rebuilt, Some(pitch));
    }
    assert_eq!(PitchClass::GSharp.with_octave(Octave::new(9)), None);
}

#[test]
fn frequencies_follow_equal_temperament() {
    assert_eq!(Pitch::new(57).frequency(), 220.);
    assert_eq!(Pitch::new(45).frequency(), 110.);
    assert!((Pitch::new(70).frequency() - 466.1638).abs() < 1e-4);
    assert_eq!(Pitch::new(75).frequency(), 440. * core::f64::consts::SQRT_2);
    assert!((Pitch::new(0).frequency() - 8.1758).abs() < 1e-4);
    assert!((Pitch::new(127).frequency() - 12543.8540).abs() < 1e-3);
}

#[test]
fn note_pitch_roundtrips() {
    let note = Note {
        pitch_class: PitchClass::C,
        octave: Octave::new(4),
        timing: 10,
        duration: 480,
        velocity: 100,
        channel: 0,
    };
    assert_eq!(note.pitch(), Pitch::new(60));
    assert_eq!(note.end(), 490);
}

#[test]
fn unrepresentable_note_falls_back_to_a4() {
    let note = Note {
        pitch_class: PitchClass::GSharp,
        octave: Octave::new(9),
        timing: 0,
        duration: 1,
        velocity: 1,
        channel: 0,
    };
    assert_eq!(Pitch::from_parts(note.pitch_class, note.octave), None);
    assert_eq!(note.pitch(), Pitch::A4);
    assert_eq!(note.frequency(), Pitch::A4_FREQUENCY);
}
