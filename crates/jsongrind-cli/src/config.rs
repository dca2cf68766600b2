//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - An optional `jsongrind.toml` file
//! - Command-line arguments (highest precedence, applied by the handlers)

use crate::error::{Error, Result};
use jsongrind_core::{GrammarConfig, DEFAULT_EXAMPLES};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent
const DEFAULT_CONFIG_FILE: &str = "jsongrind.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Grammar tuning for the document generator
    pub grammar: GrammarConfig,

    /// Session defaults applied when the matching flags are not given
    pub session: SessionFileConfig,
}

/// Session-related configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionFileConfig {
    /// Number of documents to generate per session
    pub examples: u32,

    /// Per-run timeout in seconds (no timeout if absent)
    pub timeout_secs: Option<f64>,

    /// Stop the session at the first failing run
    pub fail_fast: bool,

    /// Re-parse each document with the reference parser before feeding it
    pub validate: bool,

    /// Directory acceptance reports are written into
    pub report_dir: PathBuf,
}

impl Default for SessionFileConfig {
    fn default() -> Self {
        Self {
            examples: DEFAULT_EXAMPLES,
            timeout_secs: None,
            fail_fast: false,
            validate: false,
            report_dir: PathBuf::from("."),
        }
    }
}

impl FileConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            match Self::from_file(path) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or the default location
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.session.examples, DEFAULT_EXAMPLES);
        assert_eq!(config.session.report_dir, PathBuf::from("."));
        assert!(!config.session.fail_fast);
        assert_eq!(config.grammar.max_fuel, GrammarConfig::default().max_fuel);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config: FileConfig = toml::from_str(
            r#"
            [grammar]
            max_fuel = 16
            escape_weight = 0

            [session]
            examples = 500
            timeout_secs = 2.5
            report_dir = "reports"
            "#,
        )
        .unwrap();

        assert_eq!(config.grammar.max_fuel, 16);
        assert_eq!(config.grammar.escape_weight, 0);
        assert_eq!(config.session.examples, 500);
        assert_eq!(config.session.timeout_secs, Some(2.5));
        assert_eq!(config.session.report_dir, PathBuf::from("reports"));
        // Untouched fields keep their defaults
        assert!(!config.session.validate);
        assert_eq!(
            config.grammar.item_continue,
            GrammarConfig::default().item_continue
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: std::result::Result<FileConfig, _> = toml::from_str(
            r#"
            [session]
            exmaples = 500
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = FileConfig::from_file(Path::new("/nonexistent/jsongrind.toml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
