//! Pre-merge checks on input and output files
//!
//! A merge is only defined for two distinct regular input files and a fresh
//! regular output file, all on one filesystem. These checks run before (names)
//! and right after (metadata) the files are opened.

use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use xmerge_core::{MergeError, Result};

/// Reject identical paths among the two inputs and the output.
///
/// Inputs are compared both as given and canonicalized, so `./a` and `a`
/// are caught too. The output does not exist yet, so it is compared by name
/// and against the canonical inputs when its parent directory resolves.
pub fn validate_names(left: &Path, right: &Path, output: &Path) -> Result<()> {
    if left == right || left == output || right == output {
        return Err(MergeError::InvalidInput(
            "input and output paths must all differ".to_string(),
        ));
    }

    let left_canon = left.canonicalize()?;
    let right_canon = right.canonicalize()?;
    if left_canon == right_canon {
        return Err(MergeError::InvalidInput(format!(
            "'{}' and '{}' are the same file",
            left.display(),
            right.display()
        )));
    }

    if let Some(output_canon) = canonical_output(output) {
        if output_canon == left_canon || output_canon == right_canon {
            return Err(MergeError::InvalidInput(format!(
                "output '{}' is one of the inputs",
                output.display()
            )));
        }
    }
    Ok(())
}

fn canonical_output(output: &Path) -> Option<std::path::PathBuf> {
    let name = output.file_name()?;
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.canonicalize().ok().map(|dir| dir.join(name))
}

/// Merge inputs and outputs must be regular files.
pub fn ensure_regular(path: &Path, meta: &Metadata) -> Result<()> {
    if meta.file_type().is_file() {
        Ok(())
    } else {
        Err(MergeError::NotRegularFile(path.to_path_buf()))
    }
}

/// All three files must live on the same device.
pub fn ensure_same_device(left: &Metadata, right: &Metadata, output: &Metadata) -> Result<()> {
    if left.dev() == right.dev() && left.dev() == output.dev() {
        Ok(())
    } else {
        Err(MergeError::CrossDevice)
    }
}

/// The output must not be the same inode as either input.
pub fn ensure_distinct(left: &Metadata, right: &Metadata, output: &Metadata) -> Result<()> {
    if output.ino() == left.ino() || output.ino() == right.ino() {
        return Err(MergeError::InvalidInput(
            "output file is the same as an input file".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "a\n").unwrap();
        fs::write(&b, "b\n").unwrap();
        (dir, a, b)
    }

    #[test]
    fn test_distinct_names_accepted() {
        let (dir, a, b) = setup();
        validate_names(&a, &b, &dir.path().join("out.txt")).unwrap();
    }

    #[test]
    fn test_identical_inputs_rejected() {
        let (dir, a, _) = setup();
        let err = validate_names(&a, &a, &dir.path().join("out.txt")).unwrap_err();
        assert!(matches!(err, MergeError::InvalidInput(_)));
    }

    #[test]
    fn test_alias_of_input_rejected() {
        let (dir, a, b) = setup();
        let alias = dir.path().join(".").join("a.txt");
        assert!(validate_names(&alias, &a, &b.with_file_name("out.txt")).is_err());
    }

    #[test]
    fn test_output_equal_to_input_rejected() {
        let (_dir, a, b) = setup();
        assert!(validate_names(&a, &b, &b).is_err());
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let (dir, a, _) = setup();
        let err = validate_names(&a, &dir.path().join("nope"), &dir.path().join("o")).unwrap_err();
        assert!(matches!(err, MergeError::Io(_)));
    }

    #[test]
    fn test_directory_is_not_regular() {
        let (dir, _, _) = setup();
        let meta = fs::metadata(dir.path()).unwrap();
        let err = ensure_regular(dir.path(), &meta).unwrap_err();
        assert!(matches!(err, MergeError::NotRegularFile(_)));
    }

    #[test]
    fn test_same_file_metadata_not_distinct() {
        let (_dir, a, b) = setup();
        let ma = fs::metadata(&a).unwrap();
        let mb = fs::metadata(&b).unwrap();
        ensure_same_device(&ma, &mb, &ma).unwrap();
        assert!(ensure_distinct(&ma, &mb, &ma).is_err());
    }
}
