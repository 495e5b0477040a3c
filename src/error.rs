//! Error types for untweak

use thiserror::Error;

/// Main error type for untweak operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stream ended while reading {0} bytes")]
    TruncatedRead(usize),

    #[error("Invalid length: {0}")]
    InvalidLength(i64),

    #[error("Expected bytes {expected:02x?}, found {found:02x?}")]
    UnexpectedBytes { expected: Vec<u8>, found: Vec<u8> },

    #[error("Varint continuation bit set past the last continuation byte")]
    MalformedVarint,

    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    #[error("Unknown flat type: {0}")]
    UnknownType(String),

    #[error("Unknown flat type hash: {0:#018x}")]
    UnknownTypeHash(u64),

    #[error("Unknown record type hash: {0:#010x}")]
    UnknownRecordHash(u32),

    #[error("Flat value index {index} out of range for {len} values")]
    FlatIndexOutOfRange { index: i32, len: usize },

    #[error("Unsupported BLOB format version {0:#x}")]
    UnsupportedBlobVersion(u32),

    #[error("Unsupported parser format version {0:#x}")]
    UnsupportedParserVersion(u32),

    #[error("Unsupported string table version {0:#x}")]
    UnsupportedStringVersion(u32),
}

/// Result type alias for untweak operations
pub type Result<T> = std::result::Result<T, Error>;
