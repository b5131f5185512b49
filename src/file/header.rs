use super::{FormatType, chunk::CHUNK_PREFIX_LEN};
use crate::reader::{ReadResult, Reader};

#[doc = r#"
The decoded `MThd` chunk.

`division` is the number of ticks per quarter note. SMPTE-frame divisions
(top bit set) are not interpreted.

# Example
```rust
# use midi_score::prelude::*;
let bytes = [0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x02, 0x01, 0xE0];
let header = Header::decode(&bytes).unwrap();

assert_eq!(header, Header::new(1, 2, 480));
assert_eq!(header.format_type(), Some(FormatType::Simultaneous));
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    format: u16,
    track_count: u16,
    division: u16,
}

impl Header {
    /// Create a new header
    pub const fn new(format: u16, track_count: u16, division: u16) -> Self {
        Self {
            format,
            track_count,
            division,
        }
    }

    /// Decode a header chunk, prefix included.
    ///
    /// The declared length is not checked; the three fields are always read
    /// from offsets 8, 10 and 12.
    pub fn decode(chunk: &[u8]) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(chunk);
        reader.skip(CHUNK_PREFIX_LEN)?;
        let format = reader.read_u16_be()?;
        let track_count = reader.read_u16_be()?;
        let division = reader.read_u16_be()?;
        Ok(Self::new(format, track_count, division))
    }

    /// The raw format field
    pub const fn format(&self) -> u16 {
        self.format
    }

    /// The format field, if it is one of the three defined formats
    pub fn format_type(&self) -> Option<FormatType> {
        FormatType::try_from(self.format).ok()
    }

    /// Number of track chunks the header declares
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }

    /// Ticks per quarter note
    pub const fn division(&self) -> u16 {
        self.division
    }
}

#[test]
fn decode_reads_fixed_offsets() {
    let bytes = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x02, 0x00, 0x10, 0x00, 0x60,
    ];
    let header = Header::decode(&bytes).unwrap();
    assert_eq!(header.format(), 2);
    assert_eq!(header.track_count(), 16);
    assert_eq!(header.division(), 96);
    assert_eq!(header.format_type(), Some(FormatType::SequentiallyIndependent));
}

#[test]
fn unknown_format() {
    assert_eq!(Header::new(7, 1, 96).format_type(), None);
}

#[test]
fn short_header_is_out_of_bounds() {
    let bytes = [0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x02, 0x00, 0x01];
    assert!(Header::decode(&bytes).unwrap_err().is_out_of_bounds());
}
