#![doc = r#"
Channel voice messages

The top nibble of a channel voice status byte selects the message kind, the
low nibble is the channel.

```text
|----------------------------------------------|
| status byte | 1 k k k  c c c c               |
|             |   kind   channel               |
|----------------------------------------------|
```
"#]
use num_enum::TryFromPrimitive;

#[doc = r#"
The kinds of channel voice message, keyed by the status byte's top nibble.

Every kind has a fixed payload width that must be consumed whether or not the
decoder uses the message.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum VoiceKind {
    /// `0x8n` key, release velocity
    NoteOff = 0x8,
    /// `0x9n` key, velocity
    NoteOn = 0x9,
    /// `0xAn` key, pressure
    PolyKeyPressure = 0xA,
    /// `0xBn` controller, value
    ControlChange = 0xB,
    /// `0xCn` program
    ProgramChange = 0xC,
    /// `0xDn` pressure
    ChannelPressure = 0xD,
    /// `0xEn` lsb, msb
    PitchBend = 0xE,
}

impl VoiceKind {
    /// Number of data bytes following the status byte
    pub const fn payload_len(&self) -> usize {
        use VoiceKind::*;
        match self {
            NoteOff | NoteOn | PolyKeyPressure | ControlChange | PitchBend => 2,
            ProgramChange | ChannelPressure => 1,
        }
    }
}

#[test]
fn payload_widths() {
    use VoiceKind::*;
    let widths = [
        (NoteOff, 2),
        (NoteOn, 2),
        (PolyKeyPressure, 2),
        (ControlChange, 2),
        (ProgramChange, 1),
        (ChannelPressure, 1),
        (PitchBend, 2),
    ];
    for (kind, width) in widths {
        assert_eq!(kind.payload_len(), width, "{kind:?}");
    }
}

#[test]
fn kinds_from_nibbles() {
    assert_eq!(VoiceKind::try_from(0x9u8).unwrap(), VoiceKind::NoteOn);
    assert_eq!(VoiceKind::try_from(0xEu8).unwrap(), VoiceKind::PitchBend);
    assert!(VoiceKind::try_from(0x7u8).is_err());
    assert!(VoiceKind::try_from(0xFu8).is_err());
}
