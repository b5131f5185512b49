#![doc = r#"
Locating and slicing MIDI file chunks

# Overview

MIDI files are organized into chunks, each identified by a 4-character ASCII type identifier
followed by a 32-bit big-endian length field and then the chunk data.

```text
[Header Chunk: "MThd" | length = 6 | format | track count | division]
[Track Chunk 1: "MTrk" | length | events...]
[Track Chunk 2: "MTrk" | length | events...]
...
[Track Chunk N: "MTrk" | length | events...]
```

[`Chunks::locate`] scans a whole file for the `MThd` and `MTrk` signatures and
slices out each chunk's exact extent using its self-declared length. Each track
is then decoded as an isolated byte range, so a malformed track can never read
into its neighbour.

Bytes between or around chunks (including unknown chunk types) are ignored.
"#]
use alloc::vec::Vec;
use core::fmt;

use crate::{
    ChunkError,
    reader::{ReadResult, Reader, ReaderError},
};

/// Length of the signature and length field that open every chunk
pub const CHUNK_PREFIX_LEN: usize = 8;

/// The two chunk types the decoder understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChunkKind {
    /// `MThd`
    Header,
    /// `MTrk`
    Track,
}

impl ChunkKind {
    /// The 4-byte signature that opens the chunk
    pub const fn signature(&self) -> &'static [u8; 4] {
        match self {
            Self::Header => b"MThd",
            Self::Track => b"MTrk",
        }
    }
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => f.write_str("MThd"),
            Self::Track => f.write_str("MTrk"),
        }
    }
}

/// A chunk sliced out of the file, prefix included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawChunk<'a> {
    kind: ChunkKind,
    offset: usize,
    bytes: &'a [u8],
}

impl<'a> RawChunk<'a> {
    /// The type of chunk
    pub const fn kind(&self) -> ChunkKind {
        self.kind
    }

    /// Offset of the chunk's signature in the file
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Signature, length field and payload
    pub const fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The chunk's payload, without the 8-byte prefix
    pub fn data(&self) -> &'a [u8] {
        &self.bytes[CHUNK_PREFIX_LEN..]
    }

    /// Declared payload length
    pub fn len(&self) -> usize {
        self.bytes.len() - CHUNK_PREFIX_LEN
    }

    /// True if the chunk has no payload
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The header chunk and every track chunk of a file, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunks<'a> {
    header: RawChunk<'a>,
    tracks: Vec<RawChunk<'a>>,
}

impl<'a> Chunks<'a> {
    /// Locate the first `MThd` chunk and every `MTrk` chunk in `bytes`.
    ///
    /// Track signatures are searched from the start of the buffer. The header
    /// chunk's extent and each found track chunk's extent are skipped, so
    /// signature-like bytes inside a chunk's payload are never mistaken for
    /// another chunk.
    ///
    /// # Errors
    /// - [`ChunkError::MissingHeader`] if there is no `MThd` signature
    /// - [`ChunkError::Overrun`] if a chunk declares more bytes than the buffer holds
    /// - [`ReaderErrorKind::OutOfBounds`](crate::reader::ReaderErrorKind::OutOfBounds)
    ///   if a signature sits too close to the end to carry a length field
    pub fn locate(bytes: &'a [u8]) -> ReadResult<Self> {
        let header_offset = find(bytes, 0, ChunkKind::Header.signature())
            .ok_or(ReaderError::chunk(0, ChunkError::MissingHeader))?;
        let header = slice_chunk(bytes, header_offset, ChunkKind::Header)?;
        let header_end = header_offset + header.bytes.len();

        let mut tracks = Vec::new();
        let mut cursor = 0;
        while let Some(offset) = find(bytes, cursor, ChunkKind::Track.signature()) {
            if offset >= header_offset && offset < header_end {
                cursor = header_end;
                continue;
            }
            let track = slice_chunk(bytes, offset, ChunkKind::Track)?;
            cursor = offset + track.bytes.len();
            tracks.push(track);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            header_offset,
            tracks = tracks.len(),
            "located chunks in {} bytes",
            bytes.len()
        );

        Ok(Self { header, tracks })
    }

    /// The `MThd` chunk
    pub const fn header(&self) -> &RawChunk<'a> {
        &self.header
    }

    /// Every `MTrk` chunk, in file order
    pub fn tracks(&self) -> &[RawChunk<'a>] {
        &self.tracks
    }

    /// Check that at least `expected` track chunks were located.
    ///
    /// # Errors
    /// [`ChunkError::MissingTrack`] when fewer were found.
    pub fn expect_tracks(&self, expected: u16) -> ReadResult<()> {
        if self.tracks.len() < expected as usize {
            let position = self
                .tracks
                .last()
                .map(|t| t.offset + t.bytes.len())
                .unwrap_or(self.header.offset + self.header.bytes.len());
            return Err(ReaderError::chunk(
                position,
                ChunkError::MissingTrack {
                    expected,
                    found: self.tracks.len(),
                },
            ));
        }
        Ok(())
    }
}

fn find(bytes: &[u8], from: usize, signature: &[u8; 4]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(signature.len())
        .position(|window| window == signature)
        .map(|pos| pos + from)
}

fn slice_chunk(bytes: &[u8], offset: usize, kind: ChunkKind) -> ReadResult<RawChunk<'_>> {
    let mut reader = Reader::from_byte_slice(&bytes[offset..]);
    reader.skip(4)?;
    let declared = reader
        .read_u32_be()
        .map_err(|e| e.offset_by(offset))?;

    let available = reader.remaining();
    if declared as usize > available {
        return Err(ReaderError::chunk(
            offset,
            ChunkError::Overrun {
                kind,
                declared,
                available,
            },
        ));
    }

    Ok(RawChunk {
        kind,
        offset,
        bytes: &bytes[offset..offset + CHUNK_PREFIX_LEN + declared as usize],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const HEADER: [u8; 14] = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x02, 0x01, 0xE0,
    ];

    fn track(payload: &[u8]) -> Vec<u8> {
        let mut out = b"MTrk".to_vec();
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn slices_exact_extents() {
        let mut file = HEADER.to_vec();
        file.extend(track(&[0x00, 0xFF, 0x2F, 0x00]));
        file.extend(track(&[0x00, 0xFF, 0x2F, 0x00, 0xAA]));
        file.extend([0x00, 0x00]);

        let chunks = Chunks::locate(&file).unwrap();
        assert_eq!(chunks.header().bytes(), &HEADER);
        assert_eq!(chunks.header().len(), 6);
        assert_eq!(chunks.tracks().len(), 2);
        assert_eq!(chunks.tracks()[0].offset(), 14);
        assert_eq!(chunks.tracks()[0].data(), &[0x00, 0xFF, 0x2F, 0x00]);
        assert_eq!(chunks.tracks()[1].offset(), 26);
        assert_eq!(chunks.tracks()[1].len(), 5);
        chunks.expect_tracks(2).unwrap();
    }

    #[test]
    fn signature_inside_payload_is_not_a_chunk() {
        // a text event whose payload spells out another track signature
        let mut payload = vec![0x00, 0xFF, 0x01, 0x08];
        payload.extend(b"MTrk\0\0\0\0");
        payload.extend([0x00, 0xFF, 0x2F, 0x00]);

        let mut file = HEADER.to_vec();
        file.extend(track(&payload));

        let chunks = Chunks::locate(&file).unwrap();
        assert_eq!(chunks.tracks().len(), 1);
        assert_eq!(chunks.tracks()[0].len(), payload.len());
    }

    #[test]
    fn leading_garbage_is_skipped() {
        let mut file = vec![0x52, 0x49, 0x46, 0x46, 0x00];
        file.extend(HEADER);
        file.extend(track(&[0x00, 0xFF, 0x2F, 0x00]));

        let chunks = Chunks::locate(&file).unwrap();
        assert_eq!(chunks.header().offset(), 5);
        assert_eq!(chunks.tracks()[0].offset(), 19);
    }

    #[test]
    fn missing_header() {
        let file = track(&[0x00, 0xFF, 0x2F, 0x00]);
        let err = Chunks::locate(&file).unwrap_err();
        assert!(err.is_missing_header_chunk());
    }

    #[test]
    fn too_few_tracks() {
        let mut file = HEADER.to_vec();
        file.extend(track(&[0x00, 0xFF, 0x2F, 0x00]));

        let chunks = Chunks::locate(&file).unwrap();
        let err = chunks.expect_tracks(2).unwrap_err();
        assert!(err.is_missing_track_chunk());
        assert_eq!(err.position(), file.len());
    }

    #[test]
    fn overrunning_track() {
        let mut file = HEADER.to_vec();
        file.extend(b"MTrk");
        file.extend(100u32.to_be_bytes());
        file.extend([0x00, 0xFF, 0x2F, 0x00]);

        let err = Chunks::locate(&file).unwrap_err();
        assert!(err.is_missing_track_chunk());
        assert_eq!(err.position(), 14);
    }

    #[test]
    fn overrunning_header() {
        let file = [0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01];
        let err = Chunks::locate(&file).unwrap_err();
        assert!(err.is_missing_header_chunk());
    }

    #[test]
    fn signature_without_length() {
        let mut file = HEADER.to_vec();
        file.extend(b"MTrk\0\0");
        let err = Chunks::locate(&file).unwrap_err();
        assert!(err.is_out_of_bounds());
        assert_eq!(err.position(), 18);
    }
}
