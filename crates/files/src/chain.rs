//! Merging more than two files
//!
//! The first two inputs are merged into the output. Each further input is
//! merged with the current output into a sibling temporary file, which is then
//! renamed over the output. Each pass re-emits everything accumulated so far,
//! so the counts returned are those of the final pass.

use crate::job::{MergeJob, PartialOutput};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use xmerge_core::{MergeConfig, MergeError, MergeOptions, Result};
use xmerge_engine::RunResult;

/// Merge two or more files into `output`.
///
/// # Errors
///
/// `InvalidInput` with fewer than two inputs; otherwise any error of
/// [`MergeJob::run`]. On failure neither the output nor a temporary file is
/// left behind.
pub fn merge_files(
    output: &Path,
    inputs: &[PathBuf],
    options: MergeOptions,
    config: MergeConfig,
) -> Result<RunResult> {
    let (first, second, rest) = match inputs {
        [first, second, rest @ ..] => (first, second, rest),
        _ => {
            return Err(MergeError::InvalidInput(format!(
                "at least two input files are required, got {}",
                inputs.len()
            )))
        }
    };

    let mut result = MergeJob::new(output, first, second, options)
        .with_config(config)
        .run()?;
    if rest.is_empty() {
        return Ok(result);
    }

    let mut merged = PartialOutput::new(output);
    let temp = temp_path(output)?;
    for (pass, next) in rest.iter().enumerate() {
        debug!(pass = pass + 2, input = %next.display(), temp = %temp.display(), "Chaining merge");
        result = MergeJob::new(&temp, output, next, options)
            .with_config(config)
            .run()?;

        let mut staged = PartialOutput::new(&temp);
        fs::rename(&temp, output)?;
        staged.keep();
        sync_parent_dir(output)?;
    }
    merged.keep();

    info!(
        output = %output.display(),
        inputs = inputs.len(),
        records = result.records_written,
        "Chained merge complete"
    );
    Ok(result)
}

/// Persist the directory entry of a renamed file.
fn sync_parent_dir(path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    File::open(dir)?.sync_all()?;
    Ok(())
}

/// Hidden sibling of `output` used as the target of intermediate passes.
fn temp_path(output: &Path) -> Result<PathBuf> {
    let name = output.file_name().ok_or_else(|| {
        MergeError::InvalidInput(format!("'{}' has no file name", output.display()))
    })?;
    let temp = format!(
        ".{}.xmerge-{}",
        name.to_string_lossy(),
        std::process::id()
    );
    Ok(output.with_file_name(temp))
}
