#![doc = r#"
Tempo and meter changes, and converting ticks to wall-clock time.

Track timings are in ticks. The header's division says how many ticks make a
quarter note, and the active [`Tempo`] says how long a quarter note lasts.
A [`TempoMap`] combines the two to place any tick in absolute time.
"#]
use alloc::vec::Vec;

use crate::UMicros;

/// Beats per minute assumed before the first tempo change
pub const DEFAULT_BPM: f64 = 120.;

/// Microseconds per quarter note equivalent to [`DEFAULT_BPM`]
pub const DEFAULT_MICROS_PER_QUARTER_NOTE: u32 = 500_000;

/// A tempo change (meta event `FF 51 03 tt tt tt`)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo {
    /// Quarter notes per minute
    pub bpm: f64,
    /// Absolute tick of the change
    pub timing: u32,
    /// The raw 24-bit value the change was decoded from
    pub micros_per_quarter_note: u32,
}

impl Tempo {
    /// Create a tempo change from microseconds per quarter note.
    ///
    /// ```rust
    /// # use midi_score::prelude::*;
    /// let tempo = Tempo::from_micros_per_quarter_note(500_000, 0);
    /// assert_eq!(tempo.bpm, 120.);
    /// ```
    pub fn from_micros_per_quarter_note(micros: u32, timing: u32) -> Self {
        Self {
            bpm: 60_000_000. / micros as f64,
            timing,
            micros_per_quarter_note: micros,
        }
    }
}

/// A time signature change (meta event `FF 58 04 nn dd cc bb`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per bar
    pub numerator: u8,
    /// Beat unit, a power of two (4 for quarter notes).
    ///
    /// Zero if the encoded exponent was too large to represent.
    pub denominator: u8,
    /// Absolute tick of the change
    pub timing: u32,
}

impl TimeSignature {
    /// Create a time signature from its encoded form, where the denominator
    /// is stored as a power-of-two exponent.
    pub const fn from_exponent(numerator: u8, exponent: u8, timing: u32) -> Self {
        let denominator = match 1u8.checked_shl(exponent as u32) {
            Some(d) => d,
            None => 0,
        };
        Self {
            numerator,
            denominator,
            timing,
        }
    }
}

#[doc = r#"
Tempo lookup and tick-to-time conversion for a set of tempo changes.

# Example
```rust
# use midi_score::prelude::*;
let tempos = [
    Tempo::from_micros_per_quarter_note(500_000, 0),
    Tempo::from_micros_per_quarter_note(1_000_000, 960),
];
let map = TempoMap::new(480, &tempos);

assert_eq!(map.bpm_at(0), 120.);
assert_eq!(map.bpm_at(959), 120.);
assert_eq!(map.bpm_at(960), 60.);

// two quarter notes at 120 bpm, then one at 60 bpm
assert_eq!(map.micros_at(1440), UMicros::new(2_000_000));
```
"#]
#[derive(Debug, Clone, PartialEq)]
pub struct TempoMap {
    division: u16,
    changes: Vec<Tempo>,
}

impl TempoMap {
    /// Build a map from tempo changes in any order.
    ///
    /// Changes at the same tick keep their relative order, so the later one wins.
    pub fn new(division: u16, tempos: &[Tempo]) -> Self {
        let mut changes = tempos.to_vec();
        changes.sort_by_key(|tempo| tempo.timing);
        Self { division, changes }
    }

    /// Ticks per quarter note used for conversion. A division of zero counts as one.
    pub fn division(&self) -> u16 {
        self.division.max(1)
    }

    /// Tempo changes ordered by tick
    pub fn changes(&self) -> &[Tempo] {
        &self.changes
    }

    /// The latest tempo change at or before `tick`
    pub fn tempo_at(&self, tick: u32) -> Option<&Tempo> {
        let idx = self.changes.partition_point(|tempo| tempo.timing <= tick);
        idx.checked_sub(1).map(|idx| &self.changes[idx])
    }

    /// Active bpm at `tick`, [`DEFAULT_BPM`] before the first change
    pub fn bpm_at(&self, tick: u32) -> f64 {
        self.tempo_at(tick)
            .map(|tempo| tempo.bpm)
            .unwrap_or(DEFAULT_BPM)
    }

    /// Absolute time of `tick`, accounting for every tempo change before it
    pub fn micros_at(&self, tick: u32) -> UMicros {
        // µs = Σ ticks_in_segment * µs_per_quarter / ticks_per_quarter
        let mut numerator: u128 = 0;
        let mut segment_start = 0;
        let mut micros_per_quarter = DEFAULT_MICROS_PER_QUARTER_NOTE;

        for change in self.changes.iter().take_while(|change| change.timing <= tick) {
            let ticks = change.timing - segment_start;
            numerator += ticks as u128 * micros_per_quarter as u128;
            segment_start = change.timing;
            micros_per_quarter = change.micros_per_quarter_note;
        }
        numerator += (tick - segment_start) as u128 * micros_per_quarter as u128;

        let micros = numerator / self.division() as u128;
        UMicros::new(u64::try_from(micros).unwrap_or(u64::MAX))
    }
}

#[test]
fn default_tempo_without_changes() {
    let map = TempoMap::new(480, &[]);
    assert_eq!(map.tempo_at(0), None);
    assert_eq!(map.bpm_at(10_000), DEFAULT_BPM);
    assert_eq!(map.micros_at(480), UMicros::new(500_000));
}

#[test]
fn latest_change_wins() {
    let tempos = [
        Tempo::from_micros_per_quarter_note(400_000, 100),
        Tempo::from_micros_per_quarter_note(600_000, 0),
        Tempo::from_micros_per_quarter_note(300_000, 100),
    ];
    let map = TempoMap::new(96, &tempos);

    assert_eq!(map.bpm_at(0), 100.);
    assert_eq!(map.bpm_at(99), 100.);
    assert_eq!(map.bpm_at(100), 200.);
    assert_eq!(map.tempo_at(5_000).unwrap().micros_per_quarter_note, 300_000);
}

#[test]
fn change_before_first_tick_uses_default_segment() {
    let tempos = [Tempo::from_micros_per_quarter_note(250_000, 480)];
    let map = TempoMap::new(480, &tempos);

    assert_eq!(map.micros_at(240), UMicros::new(250_000));
    assert_eq!(map.micros_at(480), UMicros::new(500_000));
    assert_eq!(map.micros_at(960), UMicros::new(750_000));
}

#[test]
fn zero_division_counts_as_one() {
    let map = TempoMap::new(0, &[]);
    assert_eq!(map.micros_at(2), UMicros::new(1_000_000));
}

#[test]
fn time_signature_denominators() {
    assert_eq!(TimeSignature::from_exponent(6, 3, 0).denominator, 8);
    assert_eq!(TimeSignature::from_exponent(4, 2, 0).denominator, 4);
    assert_eq!(TimeSignature::from_exponent(4, 7, 0).denominator, 128);
    assert_eq!(TimeSignature::from_exponent(4, 8, 0).denominator, 0);
}
