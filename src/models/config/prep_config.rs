use crate::error::PrepError;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Limits applied while expanding one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    /// Maximum bytes in a line, including its terminator.
    pub max_line_length: usize,
    /// Maximum bytes in a macro name or value.
    pub max_token_length: usize,
    /// Maximum number of replacements performed on a single line.
    ///
    /// Growing self-references are caught by the line length bound. This only
    /// stops cycles that keep the line length, such as `PING -> PONG -> PING`.
    pub max_rewrites_per_line: usize,
    /// Maximum nesting of `#include`, counting the top-level file.
    pub max_include_depth: usize,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            max_line_length: 1023,
            max_token_length: 255,
            max_rewrites_per_line: 16384,
            max_include_depth: 32,
        }
    }
}

impl PrepConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, PrepError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(config) => Ok(config),
            Err(e) => Err(PrepError::error(&format!(
                "Invalid config file \"{}\": {}",
                path.display(),
                e
            ))),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("shader_prep").join("config.json"))
    }

    /// An explicit path must load; the per-user default is only used if present.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, PrepError> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        if let Some(path) = Self::default_path() {
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::error!("Error loading config: {}", e);
                    }
                }
            }
        }
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "max_rewrites_per_line": 8 }"#).unwrap();

        let config = PrepConfig::load_from_file(&path).unwrap();
        assert_eq!(config.max_rewrites_per_line, 8);
        assert_eq!(config.max_line_length, 1023);
        assert_eq!(config.max_token_length, 255);
    }

    #[test]
    fn test_default_rewrite_limit_exceeds_line_length() {
        let config = PrepConfig::default();
        assert!(config.max_rewrites_per_line > config.max_line_length);
    }

    #[test]
    fn test_explicit_missing_config_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");
        assert!(PrepConfig::load_or_default(Some(&path)).is_err());
    }

    #[test]
    fn test_malformed_config_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = PrepConfig::load_from_file(&path).unwrap_err();
        assert!(err.msg.contains("Invalid config file"));
    }
}
