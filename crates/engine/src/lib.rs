//! Chunked external merge engine
//!
//! This crate merges two line-oriented streams while holding at most one
//! chunk per input plus one double-size output buffer in memory:
//!
//! - Chunk: fixed-capacity buffer, adjusted to end on a record boundary
//! - StreamCursor: per-input read position over a seekable handle
//! - Merge step: interleaves two chunks under the active policy
//! - Tail drain: finishes whichever input outlives the other
//! - Merger: the streaming driver tying the phases together
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use xmerge_core::{MergeOptions, Side};
//! use xmerge_engine::{merge_streams, StreamCursor};
//!
//! let mut left = StreamCursor::measure(Side::Left, Cursor::new(b"a\nc\n".to_vec())).unwrap();
//! let mut right = StreamCursor::measure(Side::Right, Cursor::new(b"b\n".to_vec())).unwrap();
//! let mut out = Vec::new();
//!
//! let result = merge_streams(&mut left, &mut right, &mut out, MergeOptions::all()).unwrap();
//! assert_eq!(out, b"a\nb\nc\n");
//! assert_eq!(result.records_written, 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunk;
mod drain;
pub mod driver;
pub mod result;
mod sink;
mod state;
mod step;
pub mod stream;

pub use chunk::{adjust_boundary, Chunk};
pub use driver::{merge_streams, Merger};
pub use result::RunResult;
pub use stream::StreamCursor;
