//! Error types for WDB2 parsing.

use thiserror::Error;

/// Errors that can occur when parsing a WDB2 table file.
///
/// Every variant is fatal for the parse in progress: the record layout is
/// shared by all records, so a structural disagreement corrupts every record
/// identically and there is nothing to retry. An empty table
/// (`record_count == 0`) is not an error - the parse succeeds with no
/// records.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error (end of data, string decoding).
    #[error("{0}")]
    Common(#[from] dbfiles_common::Error),

    /// The schema's total element count disagrees with the header.
    #[error("field count mismatch: header declares {expected} fields, record layout provides {actual}")]
    FieldCountMismatch { expected: u32, actual: u32 },

    /// The schema's total byte size disagrees with the header.
    #[error("record size mismatch: header declares {expected} bytes, record layout occupies {actual}")]
    RecordSizeMismatch { expected: u32, actual: u32 },

    /// A field descriptor cannot be planned (array with no element count).
    #[error("invalid field description: array field `{field}` has no element count")]
    InvalidFieldDescription { field: &'static str },

    /// Decoding a record consumed more bytes than the declared record size.
    #[error("record {index} overran its slot: decode consumed {consumed} bytes of a {record_size}-byte record")]
    RecordOverrun {
        index: u32,
        consumed: usize,
        record_size: u32,
    },
}

/// Result type for WDB2 operations.
pub type Result<T> = std::result::Result<T, Error>;
