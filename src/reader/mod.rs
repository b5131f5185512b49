#![doc = r#"
Sequential big-endian reading over an immutable byte buffer.

Every read advances the [`Reader`] by exactly the width it read. There are no
peeking reads: a value the decoder looks at is a value it has consumed, so the
decoder can never silently lose its place in the byte stream.

A read that would cross the end of the buffer fails with
[`ReaderErrorKind::OutOfBounds`] and leaves the position untouched.
"#]

mod error;
pub use error::*;

/// A cursor over a byte slice.
#[derive(Debug, Clone)]
pub struct Reader<'slc> {
    data: &'slc [u8],
    position: usize,
}

impl<'slc> Reader<'slc> {
    /// Create a reader positioned at the start of `data`
    pub const fn from_byte_slice(data: &'slc [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// The current read offset
    #[inline]
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Bytes left before the end of the buffer
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// True if every byte has been consumed
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume `len` bytes and return them as a slice
    pub fn read_slice(&mut self, len: usize) -> ReadResult<&'slc [u8]> {
        if len > self.remaining() {
            return Err(ReaderError::oob(self.position));
        }
        let start = self.position;
        self.position += len;
        Ok(&self.data[start..self.position])
    }

    /// Consume exactly `N` bytes
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut out = [0; N];
        out.copy_from_slice(self.read_slice(N)?);
        Ok(out)
    }

    /// Advance past `len` bytes without looking at them
    pub fn skip(&mut self, len: usize) -> ReadResult<()> {
        self.read_slice(len).map(|_| ())
    }

    /// Read one byte
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let [byte] = self.read_exact_size()?;
        Ok(byte)
    }

    /// Read a big-endian `u16`
    pub fn read_u16_be(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Read a big-endian 24-bit integer
    pub fn read_u24_be(&mut self) -> ReadResult<u32> {
        let [hi, mid, lo] = self.read_exact_size()?;
        Ok(u32::from_be_bytes([0, hi, mid, lo]))
    }

    /// Read a big-endian `u32`
    pub fn read_u32_be(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Read a MIDI variable-length quantity.
    ///
    /// Each byte contributes its low seven bits, most significant group first.
    /// The quantity ends at the first byte whose top bit is clear.
    /// Bits shifted past the top of the `u32` are dropped.
    pub fn read_vlq(&mut self) -> ReadResult<u32> {
        let mut acc: u32 = 0;
        loop {
            let byte = self.read_u8()?;
            acc = (acc << 7) | (byte & 0x7F) as u32;
            if byte & 0x80 == 0 {
                return Ok(acc);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_by_their_width() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A];
        let mut reader = Reader::from_byte_slice(&bytes);

        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert_eq!(reader.buffer_position(), 1);
        assert_eq!(reader.read_u16_be().unwrap(), 0x0203);
        assert_eq!(reader.buffer_position(), 3);
        assert_eq!(reader.read_u24_be().unwrap(), 0x04_0506);
        assert_eq!(reader.buffer_position(), 6);
        assert_eq!(reader.read_u32_be().unwrap(), 0x0708_090A);
        assert!(reader.is_empty());
    }

    #[test]
    fn out_of_bounds_does_not_advance() {
        let bytes = [0x00, 0x01, 0x02];
        let mut reader = Reader::from_byte_slice(&bytes);
        reader.skip(1).unwrap();

        let err = reader.read_u32_be().unwrap_err();
        assert!(err.is_out_of_bounds());
        assert_eq!(err.position(), 1);
        assert_eq!(reader.buffer_position(), 1);
        assert_eq!(reader.remaining(), 2);

        assert!(reader.skip(3).is_err());
        reader.skip(2).unwrap();
        assert!(reader.read_u8().unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn variable_length_quantities() {
        let cases: &[(&[u8], u32)] = &[
            (&[0x00], 0),
            (&[0x40], 0x40),
            (&[0x7F], 0x7F),
            (&[0x81, 0x00], 0x80),
            (&[0x83, 0x60], 480),
            (&[0xC0, 0x00], 0x2000),
            (&[0xFF, 0x7F], 0x3FFF),
            (&[0x81, 0x80, 0x00], 0x4000),
            (&[0xFF, 0xFF, 0xFF, 0x7F], 0x0FFF_FFFF),
        ];
        for (bytes, expected) in cases {
            let mut reader = Reader::from_byte_slice(bytes);
            assert_eq!(reader.read_vlq().unwrap(), *expected);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn unterminated_vlq_is_out_of_bounds() {
        let mut reader = Reader::from_byte_slice(&[0x81, 0x80]);
        assert!(reader.read_vlq().unwrap_err().is_out_of_bounds());
    }
}
