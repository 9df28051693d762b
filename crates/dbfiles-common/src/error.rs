//! Error types for dbfiles-common.

use thiserror::Error;

/// Common error type for low-level read operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of data reached while reading.
    #[error("unexpected end of data: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// A null-terminated string ran off the end of the data.
    #[error("string missing null terminator")]
    MissingNullTerminator,

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
