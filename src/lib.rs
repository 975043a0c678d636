//! xmergesort - merge sorted text files with bounded memory
//!
//! Two (or more) files of newline-terminated records, each already sorted,
//! are merged into a new sorted file. Memory use is fixed: one chunk per input
//! and one output buffer, whatever the file sizes.
//!
//! # Quick Start
//!
//! ```no_run
//! use xmergesort::{MergeJob, MergeOptions};
//!
//! let result = MergeJob::new("merged.txt", "a.txt", "b.txt", MergeOptions::unique().strict())
//!     .run()?;
//! println!("{} records", result.records_written);
//! # Ok::<(), xmergesort::MergeError>(())
//! ```
//!
//! # Architecture
//!
//! - `xmerge-core`: records, comparison, options, config, errors
//! - `xmerge-engine`: chunked streaming merge over any `Read + Seek` inputs
//! - `xmerge-files`: validation, permissions and output lifecycle on disk

pub use xmerge_core::{
    CasePolicy, Comparator, MergeConfig, MergeError, MergeFlags, MergeOptions, OrderPolicy,
    OutputPolicy, Result, Side, CONFIG_FILE_NAME, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE,
    MAX_RECORD_LEN, MIN_CHUNK_SIZE, TERMINATOR,
};
pub use xmerge_engine::{merge_streams, Merger, RunResult, StreamCursor};
pub use xmerge_files::{derive_output_mode, merge_files, MergeJob};
