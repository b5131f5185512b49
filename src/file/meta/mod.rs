#![doc = r#"
Meta event tags (`FF tt ...`)

Most meta events carry a variable-length payload prefixed with its length.
A few have a fixed width; for those [`MetaTag::fixed_len`] gives the number
of bytes to consume after the tag, length byte included.

|  tag   | event                | consumed after tag     |
|--------|----------------------|------------------------|
| `0x00` | sequence number      | length + payload       |
| `0x01`–`0x07` | text events   | length + payload       |
| `0x20` | MIDI channel prefix  | 2                      |
| `0x21` | MIDI port            | 2                      |
| `0x2F` | end of track         | stop decoding          |
| `0x51` | set tempo            | 1 + 3 (decoded)        |
| `0x54` | SMPTE offset         | 6                      |
| `0x58` | time signature       | 1 + 4 (decoded)        |
| `0x59` | key signature        | 3                      |
| `0x7F` | sequencer specific   | length + payload       |
"#]
use num_enum::TryFromPrimitive;

/// The meta event tags the decoder recognises.
///
/// Unlisted tags are skipped using their length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum MetaTag {
    SequenceNumber = 0x00,
    Text = 0x01,
    Copyright = 0x02,
    TrackName = 0x03,
    InstrumentName = 0x04,
    Lyric = 0x05,
    Marker = 0x06,
    CuePoint = 0x07,
    ChannelPrefix = 0x20,
    Port = 0x21,
    EndOfTrack = 0x2F,
    Tempo = 0x51,
    SmpteOffset = 0x54,
    TimeSignature = 0x58,
    KeySignature = 0x59,
    SequencerSpecific = 0x7F,
}

impl MetaTag {
    /// Bytes following the tag, length byte included, for fixed-width events.
    ///
    /// `None` for events whose width comes from their length prefix.
    pub const fn fixed_len(&self) -> Option<usize> {
        use MetaTag::*;
        match self {
            ChannelPrefix | Port => Some(2),
            KeySignature => Some(3),
            Tempo => Some(4),
            TimeSignature => Some(5),
            SmpteOffset => Some(6),
            EndOfTrack => Some(0),
            SequenceNumber | Text | Copyright | TrackName | InstrumentName | Lyric | Marker
            | CuePoint | SequencerSpecific => None,
        }
    }
}

#[test]
fn fixed_widths_include_length_byte() {
    assert_eq!(MetaTag::try_from(0x51u8).unwrap().fixed_len(), Some(4));
    assert_eq!(MetaTag::try_from(0x58u8).unwrap().fixed_len(), Some(5));
    assert_eq!(MetaTag::try_from(0x54u8).unwrap().fixed_len(), Some(6));
    assert_eq!(MetaTag::try_from(0x59u8).unwrap().fixed_len(), Some(3));
    assert_eq!(MetaTag::try_from(0x20u8).unwrap().fixed_len(), Some(2));
    assert_eq!(MetaTag::Lyric.fixed_len(), None);
    assert!(MetaTag::try_from(0x60u8).is_err());
}
