use crate::file::ChunkKind;
use thiserror::Error;

#[doc = r#"
The set of structural problems the decoder can find in a file.

These are always carried inside a [`ReaderError`](crate::reader::ReaderError),
which adds the byte position where the problem was detected.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Chunk layout errors
    #[error("Chunk: {0}")]
    Chunk(#[from] ChunkError),
    /// Track event stream errors
    #[error("Track: {0}")]
    Track(#[from] TrackError),
}

/// Errors raised while locating the `MThd` and `MTrk` chunks of a file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    /// No `MThd` signature anywhere in the buffer
    #[error("No MThd header chunk found")]
    MissingHeader,
    /// The header declares more tracks than there are `MTrk` chunks
    #[error("Header declares {expected} track chunks, found {found}")]
    MissingTrack {
        /// Track count declared by the header
        expected: u16,
        /// Number of track chunks located
        found: usize,
    },
    /// A chunk's declared length runs past the end of the buffer
    #[error("{kind} chunk declares {declared} bytes, but only {available} remain")]
    Overrun {
        /// The chunk that overran
        kind: ChunkKind,
        /// Declared payload length
        declared: u32,
        /// Payload bytes actually left in the buffer
        available: usize,
    },
}

/// Errors raised while decoding a track's event stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    /// The track ran out of bytes before an end-of-track meta event
    #[error("Track ended without an end-of-track event")]
    Truncated,
}
