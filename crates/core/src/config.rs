//! Merge configuration via `xmerge.toml`
//!
//! Only tunables live here. Policy (unique vs all, case, strictness) always
//! comes from the caller's flags, never from a file.

use crate::error::{MergeError, Result};
use crate::limits::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "xmerge.toml";

/// Merge tunables loaded from `xmerge.toml`.
///
/// # Example
///
/// ```toml
/// # Bytes read from each input per merge step (default: 4096)
/// chunk_size = 4096
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Capacity of each input chunk in bytes.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
        }
    }
}

impl MergeConfig {
    /// Config with an explicit chunk size, validated.
    pub fn with_chunk_size(chunk_size: usize) -> Result<Self> {
        let config = Self { chunk_size };
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its limits.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size < MIN_CHUNK_SIZE {
            return Err(MergeError::InvalidConfig(format!(
                "chunk_size {} is below the minimum of {} bytes",
                self.chunk_size, MIN_CHUNK_SIZE
            )));
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(MergeError::InvalidConfig(format!(
                "chunk_size {} is above the maximum of {} bytes",
                self.chunk_size, MAX_CHUNK_SIZE
            )));
        }
        Ok(())
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MergeConfig = toml::from_str(content)
            .map_err(|e| MergeError::InvalidConfig(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MergeError::InvalidConfig(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# xmergesort configuration
#
# Bytes read from each input per merge step (default: 4096).
# Must be at least 201 so a maximum-length record and its newline fit,
# and at most 67108864 (64 MiB).
chunk_size = 4096
"#
    }

    /// Serialize this config to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| MergeError::InvalidConfig(format!("failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_toml_parses_to_default() {
        let config = MergeConfig::from_toml_str(MergeConfig::default_toml()).unwrap();
        assert_eq!(config, MergeConfig::default());
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config = MergeConfig::from_toml_str("").unwrap();
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_chunk_size_below_minimum_rejected() {
        let err = MergeConfig::from_toml_str("chunk_size = 64").unwrap_err();
        assert!(matches!(err, MergeError::InvalidConfig(_)));
        assert!(MergeConfig::with_chunk_size(MIN_CHUNK_SIZE).is_ok());
        assert!(MergeConfig::with_chunk_size(MIN_CHUNK_SIZE - 1).is_err());
    }

    #[test]
    fn test_chunk_size_above_maximum_rejected() {
        let err = MergeConfig::from_toml_str("chunk_size = 9223372036854775807").unwrap_err();
        assert!(matches!(err, MergeError::InvalidConfig(_)));
        assert_eq!(err.status(), -22);
        assert!(MergeConfig::with_chunk_size(MAX_CHUNK_SIZE).is_ok());
        assert!(MergeConfig::with_chunk_size(MAX_CHUNK_SIZE + 1).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(MergeConfig::from_toml_str("chunk_size = \"big\"").is_err());
    }

    #[test]
    fn test_from_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = MergeConfig::with_chunk_size(8192).unwrap();
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

        let loaded = MergeConfig::from_file(&path).unwrap();
        assert_eq!(loaded.chunk_size, 8192);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = MergeConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }
}
