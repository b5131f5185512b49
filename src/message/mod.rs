#![doc = r#"
Classification of the status bytes found in a track's event stream.

```text
|--------------|-----------------------------------------|
| 0x80..=0xEF  | channel voice (kind nibble + channel)   |
| 0xF0, 0xF7   | system exclusive, VLQ length + payload  |
| 0xFF         | meta event, tag byte + payload          |
| anything else| unsupported (running status, sys common)|
|--------------|-----------------------------------------|
```
"#]
pub mod channel;

use channel::VoiceKind;

/// A decoded status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// `0xFF`
    Meta,
    /// `0xF0` or `0xF7`
    SystemExclusive,
    /// A channel voice message
    ChannelVoice {
        /// Message kind, from the top nibble
        kind: VoiceKind,
        /// Channel, from the low nibble
        channel: u8,
    },
    /// A byte the decoder has no payload rule for.
    ///
    /// Data bytes (running status) and system common / real-time bytes land here.
    Unsupported(u8),
}

impl Status {
    /// The meta event sentinel
    pub const META: u8 = 0xFF;
    /// System exclusive start
    pub const SYSEX: u8 = 0xF0;
    /// System exclusive continuation / escape
    pub const SYSEX_ESCAPE: u8 = 0xF7;
}

impl From<u8> for Status {
    fn from(byte: u8) -> Self {
        match byte {
            Self::META => Self::Meta,
            Self::SYSEX | Self::SYSEX_ESCAPE => Self::SystemExclusive,
            _ => match VoiceKind::try_from(byte >> 4) {
                Ok(kind) => Self::ChannelVoice {
                    kind,
                    channel: byte & 0x0F,
                },
                Err(_) => Self::Unsupported(byte),
            },
        }
    }
}

#[test]
fn classify_status_bytes() {
    assert_eq!(Status::from(0xFF), Status::Meta);
    assert_eq!(Status::from(0xF0), Status::SystemExclusive);
    assert_eq!(Status::from(0xF7), Status::SystemExclusive);
    assert_eq!(
        Status::from(0x93),
        Status::ChannelVoice {
            kind: VoiceKind::NoteOn,
            channel: 3
        }
    );
    assert_eq!(
        Status::from(0x8F),
        Status::ChannelVoice {
            kind: VoiceKind::NoteOff,
            channel: 15
        }
    );
    assert_eq!(Status::from(0x3C), Status::Unsupported(0x3C));
    assert_eq!(Status::from(0xF8), Status::Unsupported(0xF8));
}
