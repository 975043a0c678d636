//! Core types for xmergesort
//!
//! This crate defines the pieces of the merge that do not touch a stream:
//! - Side: identifies the first or second input
//! - MergeFlags / MergeOptions: raw policy bitset and its validated form
//! - MergeConfig: tunables loaded from `xmerge.toml`
//! - Record extraction and the last-emitted record slot
//! - Comparator: record ordering and emission verdicts
//! - Limits: maximum record length and chunk sizing
//! - MergeError: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compare;
pub mod config;
pub mod error;
pub mod limits;
pub mod options;
pub mod record;
pub mod types;

pub use compare::{Comparator, Verdict};
pub use config::{MergeConfig, CONFIG_FILE_NAME};
pub use error::{MergeError, Result};
pub use limits::{
    DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, MAX_RECORD_LEN, MIN_CHUNK_SIZE, TERMINATOR,
};
pub use options::{CasePolicy, MergeFlags, MergeOptions, OrderPolicy, OutputPolicy};
pub use record::{extract_record, ExtractError, LastRecord};
pub use types::Side;
