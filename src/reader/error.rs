use crate::{ChunkError, ParseError, TrackError};
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while decoding a file into a [`Score`](crate::file::Score)
"#]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderErrorKind {
    /// Parsing errors
    #[error("Parsing {0}")]
    ParseError(#[from] ParseError),
    /// Reading out of bounds.
    #[error("Read out of bounds!")]
    OutOfBounds,
}

impl ReaderErrorKind {
    pub(crate) const fn chunk(chunk_err: ChunkError) -> Self {
        Self::ParseError(ParseError::Chunk(chunk_err))
    }
    pub(crate) const fn track(track_err: TrackError) -> Self {
        Self::ParseError(ParseError::Track(track_err))
    }
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }

    /// True if a read crossed the end of its buffer
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::OutOfBounds)
    }

    /// True if the file has no usable `MThd` chunk.
    ///
    /// This includes a header chunk whose declared length overruns the buffer.
    pub const fn is_missing_header_chunk(&self) -> bool {
        use crate::file::ChunkKind;
        matches!(
            self.kind,
            ReaderErrorKind::ParseError(ParseError::Chunk(
                ChunkError::MissingHeader
                    | ChunkError::Overrun {
                        kind: ChunkKind::Header,
                        ..
                    }
            ))
        )
    }

    /// True if fewer track chunks than declared could be sliced out of the file.
    ///
    /// This includes a track chunk whose declared length overruns the buffer.
    pub const fn is_missing_track_chunk(&self) -> bool {
        use crate::file::ChunkKind;
        matches!(
            self.kind,
            ReaderErrorKind::ParseError(ParseError::Chunk(
                ChunkError::MissingTrack { .. }
                    | ChunkError::Overrun {
                        kind: ChunkKind::Track,
                        ..
                    }
            ))
        )
    }

    /// True if a track ended without an end-of-track event
    pub const fn is_truncated_track(&self) -> bool {
        matches!(
            self.kind,
            ReaderErrorKind::ParseError(ParseError::Track(TrackError::Truncated))
        )
    }

    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }

    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Shift the position by `offset`.
    ///
    /// Track chunks are decoded over their own slice; this rebases their
    /// errors onto the whole file.
    pub(crate) const fn offset_by(mut self, offset: usize) -> Self {
        self.position += offset;
        self
    }

    /// Create a new chunk layout error
    pub const fn chunk(position: usize, error: ChunkError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::chunk(error),
        }
    }

    /// Create a new truncated track error
    pub const fn truncated_track(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::track(TrackError::Truncated),
        }
    }

    /// Create a new out of bounds error
    pub const fn oob(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::OutOfBounds,
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;
