//! Merge of two input files into a new output file
//!
//! `MergeJob` is the file-level entry point: it validates the paths, opens
//! both inputs read-only, creates the output exclusively with a permission
//! mode derived from the inputs, and runs the engine. If anything fails after
//! the output exists, the partial output is removed.

use crate::mode::derive_output_mode;
use crate::validate::{ensure_distinct, ensure_regular, ensure_same_device, validate_names};
use std::fs::{self, File, OpenOptions};
use std::os::unix::fs::{MetadataExt, OpenOptionsExt};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use xmerge_core::{MergeConfig, MergeOptions, Result, Side};
use xmerge_engine::{Merger, RunResult, StreamCursor};

/// Merge two files into a freshly created output.
#[derive(Debug, Clone)]
pub struct MergeJob {
    output: PathBuf,
    left: PathBuf,
    right: PathBuf,
    options: MergeOptions,
    config: MergeConfig,
}

impl MergeJob {
    /// Job with default tunables
    pub fn new(
        output: impl Into<PathBuf>,
        left: impl Into<PathBuf>,
        right: impl Into<PathBuf>,
        options: MergeOptions,
    ) -> Self {
        MergeJob {
            output: output.into(),
            left: left.into(),
            right: right.into(),
            options,
            config: MergeConfig::default(),
        }
    }

    /// Replace the tunables
    pub fn with_config(mut self, config: MergeConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the merge.
    ///
    /// # Errors
    ///
    /// Fails without touching the filesystem on invalid paths or config;
    /// fails with `AlreadyExists` if the output exists. Any later failure
    /// removes the output before returning.
    pub fn run(&self) -> Result<RunResult> {
        let merger = Merger::with_config(self.options, self.config)?;
        validate_names(&self.left, &self.right, &self.output)?;

        let left_file = File::open(&self.left)?;
        let left_meta = left_file.metadata()?;
        ensure_regular(&self.left, &left_meta)?;

        let right_file = File::open(&self.right)?;
        let right_meta = right_file.metadata()?;
        ensure_regular(&self.right, &right_meta)?;

        let mode = derive_output_mode(left_meta.mode(), right_meta.mode());
        info!(
            left = %self.left.display(),
            right = %self.right.display(),
            output = %self.output.display(),
            mode = %format_args!("{:o}", mode),
            options = %self.options,
            "Merging files"
        );

        let output_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(mode)
            .open(&self.output)?;
        let mut partial = PartialOutput::new(&self.output);

        let output_meta = output_file.metadata()?;
        ensure_regular(&self.output, &output_meta)?;
        ensure_same_device(&left_meta, &right_meta, &output_meta)?;
        ensure_distinct(&left_meta, &right_meta, &output_meta)?;

        let mut left = StreamCursor::new(Side::Left, left_file, left_meta.len());
        let mut right = StreamCursor::new(Side::Right, right_file, right_meta.len());
        let result = merger.run(&mut left, &mut right, &output_file)?;
        output_file.sync_all()?;

        partial.keep();
        info!(
            output = %self.output.display(),
            bytes = result.bytes_written,
            records = result.records_written,
            duplicates = result.duplicates_skipped,
            disordered = result.disordered_skipped,
            "Merge complete"
        );
        Ok(result)
    }
}

/// Removes a created output file unless told to keep it.
#[derive(Debug)]
pub(crate) struct PartialOutput<'a> {
    path: &'a Path,
    keep: bool,
}

impl<'a> PartialOutput<'a> {
    pub(crate) fn new(path: &'a Path) -> Self {
        PartialOutput { path, keep: false }
    }

    pub(crate) fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for PartialOutput<'_> {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        match fs::remove_file(self.path) {
            Ok(()) => warn!(path = %self.path.display(), "Removed partial output"),
            Err(e) => debug!(path = %self.path.display(), error = %e, "Could not remove partial output"),
        }
    }
}
