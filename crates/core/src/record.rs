//! Record extraction and the last-emitted record slot
//!
//! A record is the bytes of one line, terminator excluded. Records are
//! borrowed straight out of the chunk they live in; the only copy ever made is
//! the [`LastRecord`] snapshot that carries duplicate and order checks across
//! chunk boundaries.

use crate::limits::{MAX_RECORD_LEN, TERMINATOR};
use thiserror::Error;

/// Reasons a record cannot be carved out of a buffer.
///
/// These carry buffer-relative positions only; the engine attaches the input
/// and absolute stream offset when it turns them into a
/// [`MergeError`](crate::MergeError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// No terminator within `MAX_RECORD_LEN + 1` bytes of the offset
    #[error("record exceeds {max} bytes")]
    TooLong {
        /// Maximum supported record length
        max: usize,
    },

    /// Buffer ended before a terminator was found
    #[error("record at offset {offset} has no terminator")]
    Unterminated {
        /// Offset of the record's first byte in the buffer
        offset: usize,
    },

    /// Offset is at or past the end of the buffer's valid bytes
    #[error("offset {offset} is past valid length {len}")]
    OutOfBounds {
        /// Requested offset
        offset: usize,
        /// Valid length of the buffer
        len: usize,
    },
}

/// Carve one record out of `buf` starting at `offset`.
///
/// `buf` must be exactly the valid bytes of a chunk. Returns the record
/// (terminator excluded) and the number of bytes consumed, terminator
/// included.
pub fn extract_record(buf: &[u8], offset: usize) -> Result<(&[u8], usize), ExtractError> {
    if offset >= buf.len() {
        return Err(ExtractError::OutOfBounds {
            offset,
            len: buf.len(),
        });
    }

    let window_end = buf.len().min(offset + MAX_RECORD_LEN + 1);
    let window = &buf[offset..window_end];
    match window.iter().position(|&b| b == TERMINATOR) {
        Some(len) => Ok((&window[..len], len + 1)),
        None if window.len() > MAX_RECORD_LEN => Err(ExtractError::TooLong {
            max: MAX_RECORD_LEN,
        }),
        None => Err(ExtractError::Unterminated { offset }),
    }
}

/// The most recently emitted record.
///
/// Empty until the first emission; an absent record is neither a duplicate of
/// nor greater than anything.
#[derive(Debug, Clone, Default)]
pub struct LastRecord {
    bytes: Vec<u8>,
    present: bool,
}

impl LastRecord {
    /// Empty slot with room for a maximum-length record
    pub fn new() -> Self {
        LastRecord {
            bytes: Vec::with_capacity(MAX_RECORD_LEN),
            present: false,
        }
    }

    /// The stored record, if anything has been emitted yet
    pub fn get(&self) -> Option<&[u8]> {
        if self.present {
            Some(&self.bytes)
        } else {
            None
        }
    }

    /// Overwrite the slot with `record`
    pub fn set(&mut self, record: &[u8]) {
        self.bytes.clear();
        self.bytes.extend_from_slice(record);
        self.present = true;
    }
}
