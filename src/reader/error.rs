use thiserror::Error;

#[doc = r#"
An error raised while decoding bytes into the midi representation.

Every error carries the absolute byte offset into the decoded buffer at
which it occurred, to aid debugging malformed files.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("decoding at byte {position}: {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReaderErrorKind {
    /// A decoder needed more bytes than remain in the buffer.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A chunk's declared length overruns the remaining buffer. Fatal:
    /// chunk boundaries cannot be trusted past this point.
    #[error("chunk length {declared} exceeds the {remaining} remaining bytes")]
    TruncatedChunk {
        /// The 32-bit length the chunk header declared.
        declared: u32,
        /// How many bytes were actually left in the buffer.
        remaining: usize,
    },
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }

    /// Create a new unexpected-end-of-input error
    pub const fn eof(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::UnexpectedEndOfInput,
        }
    }

    /// True if the reader ran off the end of the input
    pub const fn is_unexpected_eof(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::UnexpectedEndOfInput)
    }

    /// Returns the error kind of the reader.
    pub const fn kind(&self) -> &ReaderErrorKind {
        &self.kind
    }

    /// Returns the absolute byte offset where the error occurred.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Shift the error position by the offset of an enclosing region.
    ///
    /// Chunk payloads are decoded through a sub-reader whose positions are
    /// relative to the payload start; rebasing makes them absolute again.
    pub(crate) const fn rebase(mut self, base: usize) -> Self {
        self.position += base;
        self
    }
}

/// The read result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;
