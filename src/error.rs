//! Error types for snapshot decoding, fetching and rendering

use std::io;
use thiserror::Error;

use crate::schema::DocumentKind;

/// Errors that can occur while building or using a base-N codec
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Alphabet has 255 or more characters
    #[error("Alphabet too long: {0} characters, must be fewer than 255")]
    AlphabetTooLong(usize),
    /// Alphabet cannot express a positional base
    #[error("Alphabet too short: {0} characters, need at least 2")]
    AlphabetTooShort(usize),
    /// A character appears more than once in the alphabet
    #[error("Ambiguous alphabet: '{0}' appears more than once")]
    AmbiguousAlphabet(char),
    /// Alphabet characters must fit the 256-entry lookup table
    #[error("Alphabet character '{0}' is not ASCII")]
    NonAsciiAlphabet(char),
    /// Input text contains a character outside the alphabet
    #[error("Invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },
    /// Base conversion left a non-zero carry
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
    /// Decoded value has the wrong byte length
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Errors that can occur while decoding a binary document
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    /// A read would run past the end of the buffer
    #[error("Out of bounds at offset {offset}: needed {needed} bytes, {available} available")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// Bytes are present but do not form a valid value
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
    /// Document version byte outside the range accepted for its kind
    #[error("Unsupported {kind} version: {version}")]
    UnsupportedVersion { kind: DocumentKind, version: u8 },
    /// Tagged union discriminant outside the known variant set
    #[error("Invalid variant discriminant: {0}")]
    InvalidVariant(u64),
    /// Base58 conversion failure
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

impl DecodeError {
    /// Build an out-of-bounds error for a read of `needed` bytes.
    pub(crate) fn out_of_bounds(offset: usize, needed: usize, available: usize) -> Self {
        DecodeError::OutOfBounds {
            offset,
            needed,
            available,
        }
    }
}

/// Errors that can occur while fetching raw documents
#[derive(Debug, Error)]
pub enum SourceError {
    /// Resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),
    /// File system error
    #[error("File system error: {0}")]
    FileSystemError(String),
    /// Latest-timestamp marker did not contain a number
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors that can occur while writing rendered records
#[derive(Debug, Error)]
pub enum SinkError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Top-level error type for the loading and query API
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Source error
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Decode error in a named resource
    #[error("Decode error in {resource}: {source}")]
    Decode {
        resource: String,
        #[source]
        source: DecodeError,
    },

    /// Sink error
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// Codec error (e.g. a malformed public key argument)
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Requested validator is not in the snapshot
    #[error("Validator not found: {0}")]
    NotFound(String),

    /// Leaderboard name is not recognised
    #[error("Unknown award category: {0}")]
    UnknownCategory(String),
}

impl From<DecodeError> for ReaderError {
    fn from(err: DecodeError) -> Self {
        ReaderError::Decode {
            resource: String::new(),
            source: err,
        }
    }
}
