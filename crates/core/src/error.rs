//! Error types for xmergesort
//!
//! This module defines all error types used throughout the merge pipeline.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Every error also maps onto a negative errno-style status via
//! [`MergeError::status`], so callers that speak the "byte count or negative
//! status" convention can report failures without inspecting variants.

use crate::types::Side;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for merge operations
pub type Result<T> = std::result::Result<T, MergeError>;

const EPERM: i32 = 1;
const EIO: i32 = 5;
const EACCES: i32 = 13;
const EINVAL: i32 = 22;

/// Error types for the merge pipeline
#[derive(Debug, Error)]
pub enum MergeError {
    /// I/O error while reading an input or writing the output
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The writer accepted fewer bytes than it was handed
    #[error("Short write: expected {expected} bytes, wrote {written}")]
    ShortWrite {
        /// Bytes handed to the writer
        expected: usize,
        /// Bytes the writer reported
        written: usize,
    },

    /// A record exceeds the maximum supported length
    #[error("Record too long in {input} at offset {offset}: maximum is {max} bytes")]
    RecordTooLong {
        /// Input the record came from
        input: Side,
        /// Byte offset of the record's first byte in that input
        offset: u64,
        /// Maximum supported record length
        max: usize,
    },

    /// A chunk ended without a terminator where one was required
    #[error("Unterminated record in {input} at offset {offset}")]
    UnterminatedRecord {
        /// Input the record came from
        input: Side,
        /// Byte offset of the record's first byte in that input
        offset: u64,
    },

    /// Strict order checking found an input that is not sorted
    #[error("Input not sorted: {input} has an out-of-order record at offset {offset}")]
    OrderViolation {
        /// Input that is out of order
        input: Side,
        /// Byte offset of the offending record in that input
        offset: u64,
    },

    /// Flags bitset is not a valid merge policy
    #[error("Invalid flags: {0}")]
    InvalidFlags(String),

    /// Configuration value out of range or unparsable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid combination of input/output files
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Merge is only defined on regular files
    #[error("Not a regular file: {}", .0.display())]
    NotRegularFile(PathBuf),

    /// Inputs and output live on different filesystems
    #[error("Inputs and output must reside on the same filesystem")]
    CrossDevice,
}

impl MergeError {
    /// Negative errno-style status for this error.
    ///
    /// I/O errors carrying an OS error code report that code; order
    /// violations report `-1`.
    pub fn status(&self) -> i32 {
        match self {
            MergeError::Io(e) => -e.raw_os_error().unwrap_or(EIO),
            MergeError::ShortWrite { .. } => -EIO,
            MergeError::RecordTooLong { .. } | MergeError::UnterminatedRecord { .. } => -EINVAL,
            MergeError::OrderViolation { .. } => -1,
            MergeError::InvalidFlags(_)
            | MergeError::InvalidConfig(_)
            | MergeError::InvalidInput(_) => -EINVAL,
            MergeError::NotRegularFile(_) => -EPERM,
            MergeError::CrossDevice => -EACCES,
        }
    }

    /// True if the error reports unsorted input under strict checking
    pub fn is_order_violation(&self) -> bool {
        matches!(self, MergeError::OrderViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let err = MergeError::Io(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        let msg = err.to_string();
        assert!(msg.contains("I/O error"));
    }

    #[test]
    fn test_error_display_record_too_long() {
        let err = MergeError::RecordTooLong {
            input: Side::Left,
            offset: 4096,
            max: 200,
        };
        let msg = err.to_string();
        assert!(msg.contains("Record too long"));
        assert!(msg.contains("first input"));
        assert!(msg.contains("4096"));
        assert!(msg.contains("200"));
    }

    #[test]
    fn test_error_display_order_violation() {
        let err = MergeError::OrderViolation {
            input: Side::Right,
            offset: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains("not sorted"));
        assert!(msg.contains("second input"));
        assert!(err.is_order_violation());
    }

    #[test]
    fn test_error_display_not_regular_file() {
        let err = MergeError::NotRegularFile(PathBuf::from("/dev/null"));
        assert!(err.to_string().contains("/dev/null"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(MergeError::InvalidInput("same".into()).status(), -22);
        assert_eq!(MergeError::NotRegularFile(PathBuf::new()).status(), -1);
        assert_eq!(MergeError::CrossDevice.status(), -13);
        assert_eq!(
            MergeError::OrderViolation {
                input: Side::Left,
                offset: 0
            }
            .status(),
            -1
        );
        assert_eq!(
            MergeError::ShortWrite {
                expected: 4,
                written: 2
            }
            .status(),
            -5
        );
    }

    #[test]
    fn test_status_uses_os_error_code() {
        let err = MergeError::Io(io::Error::from_raw_os_error(17));
        assert_eq!(err.status(), -17);

        let err = MergeError::Io(io::Error::new(io::ErrorKind::Other, "no code"));
        assert_eq!(err.status(), -5);
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: MergeError = io_err.into();
        assert!(matches!(err, MergeError::Io(_)));
        assert!(!err.is_order_violation());
    }
}
