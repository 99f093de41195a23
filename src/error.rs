//! Error types for the DWG bitstream decoder

use thiserror::Error;

/// Error raised by a bitstream read.
///
/// A failed read never moves the caller's bit cursor, so the caller may skip
/// the offending record and keep decoding independent ones.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DwgError {
    /// The read needs more bits than the buffer holds past the cursor
    #[error("Read of {bits} bits at bit offset {bit_offset} exceeds buffer of {buffer_len} bytes")]
    OutOfBounds {
        bit_offset: usize,
        bits: usize,
        buffer_len: usize,
    },

    /// A 2-bit prefix code the format marks as "not used"
    #[error("Invalid prefix code {code} for {value_type}")]
    InvalidPrefixCode { value_type: &'static str, code: u8 },

    /// A modular integer still flags a continuation on its last permitted byte
    #[error("{value_type} continues past the maximum of {max_bytes} bytes")]
    ContinuationOverflow {
        value_type: &'static str,
        max_bytes: usize,
    },

    /// Handle payload longer than the configured maximum
    #[error("Handle byte count {counter} exceeds maximum of {max}")]
    HandleTooLong { counter: usize, max: usize },

    /// Negative character count in front of a text value
    #[error("Invalid text length: {0}")]
    InvalidTextLength(i16),

    /// Checksum range outside the slice
    #[error("Range {start}+{count} is outside a slice of {len} bytes")]
    InvalidRange {
        start: usize,
        count: usize,
        len: usize,
    },

    /// A value the writer cannot represent in the requested encoding
    #[error("Value out of range for {value_type}: {value}")]
    ValueOutOfRange {
        value_type: &'static str,
        value: i64,
    },
}

/// Result type alias for bitstream operations
pub type Result<T> = std::result::Result<T, DwgError>;
