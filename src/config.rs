//! YAML Configuration File Support for docsim
//!
//! One YAML file carries the settings of both stages. Every section is
//! optional and falls back to its defaults, and so does every field inside a
//! section.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # docsim configuration
//! version: "1.0"
//! name: "news-dedup"
//!
//! ingest:
//!   version: 1
//!   strip_control_chars: true
//!   normalize_whitespace: false
//!   max_text_bytes: 10485760
//!   extensions: ["txt", "md"]
//!
//! lsh:
//!   version: 1
//!   k: 3
//!   num_hashes: 20
//!   bands: 10
//!   seed: 1732584193
//!   use_parallel: false
//! ```

use std::fs;
use std::path::Path;

use ingest::IngestConfig;
use lsh::LshConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for a docsim run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DocsimConfig {
    /// Configuration format version
    #[serde(default = "default_format_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Ingest stage configuration
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Shingling, MinHash and banding configuration
    #[serde(default)]
    pub lsh: LshConfig,
}

impl DocsimConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: DocsimConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration back to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// True when `version` names a configuration format this build reads.
    pub fn is_supported_version(&self) -> bool {
        matches!(self.version.as_str(), "1.0" | "1")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if !self.is_supported_version() {
            return Err(ConfigLoadError::UnsupportedVersion(self.version.clone()));
        }

        self.ingest
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("ingest: {err}")))?;
        self.lsh
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("lsh: {err}")))?;

        Ok(())
    }
}

impl Default for DocsimConfig {
    fn default() -> Self {
        Self {
            version: default_format_version(),
            name: None,
            ingest: IngestConfig::default(),
            lsh: LshConfig::default(),
        }
    }
}

fn default_format_version() -> String {
    "1.0".to_string()
}
