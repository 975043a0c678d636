//! File-level merge operations
//!
//! This crate wraps the streaming engine with everything that concerns real
//! files on disk:
//!
//! - Path and metadata validation (distinct, regular, same device)
//! - Output permission derivation from the inputs
//! - Exclusive output creation with removal on failure
//! - Chaining of more than two inputs

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chain;
pub mod job;
pub mod mode;
pub mod validate;

pub use chain::merge_files;
pub use job::MergeJob;
pub use mode::derive_output_mode;
pub use validate::{ensure_distinct, ensure_regular, ensure_same_device, validate_names};
