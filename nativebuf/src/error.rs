//! Error types for nativebuf

use thiserror::Error;

/// Result type for nativebuf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for nativebuf operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid base64 format: {0}")]
    Format(#[from] FormatError),

    #[error("out of range: {0}")]
    Range(#[from] RangeError),
}

/// The input is not well-formed base64.
///
/// Every variant is the same kind of failure to a caller; the variant only
/// says why the input was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// A character outside the base64 alphabet that is not whitespace.
    #[error("invalid character {ch:?} at offset {offset}")]
    InvalidCharacter { ch: char, offset: usize },

    /// A padding symbol in the first or second position of a quartet.
    #[error("padding at offset {offset} is not in the last two positions of a quartet")]
    MisplacedPadding { offset: usize },

    /// A data symbol following a padding symbol.
    #[error("unexpected character {ch:?} after padding at offset {offset}")]
    DataAfterPadding { ch: char, offset: usize },

    /// More than two padding symbols.
    #[error("too many padding characters")]
    ExcessPadding,

    /// The number of significant symbols is not a multiple of four.
    #[error("input length {0} is not a multiple of four")]
    InvalidLength(usize),

    /// The input ended in the middle of a quartet.
    #[error("incomplete trailing quartet")]
    IncompleteQuartet,

    /// The decoded byte count differs from the precomputed size.
    #[error("decoded {actual} bytes, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// An offset or length falls outside the buffers involved.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("start {start} is past the end of a {len} byte store")]
    StartOutOfBounds { start: usize, len: usize },

    #[error("length {length} exceeds the maximum buffer size of {max}")]
    LengthTooLarge { length: usize, max: usize },

    #[error("start {start} + length {length} exceeds the {available} bytes available in the store")]
    RangeExceedsStore {
        start: usize,
        length: usize,
        available: usize,
    },

    #[error("start {start} + length {length} exceeds the {available} byte source")]
    RangeExceedsSource {
        start: usize,
        length: usize,
        available: usize,
    },

    #[error("length {length} exceeds the {capacity} byte destination")]
    DestinationTooSmall { length: usize, capacity: usize },
}
