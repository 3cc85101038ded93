//! Configuration types for document intake.
//!
//! [`IngestConfig`] is cheap to clone and serializable, so it can be embedded in
//! a YAML or JSON configuration file.
//!
//! ```rust
//! use ingest::IngestConfig;
//!
//! let config = IngestConfig::default();
//! config.validate().expect("default config is valid");
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Runtime configuration for ingest behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IngestConfig {
    /// Configuration schema version.
    pub version: u32,
    /// Strip control characters from identifiers before validation.
    pub strip_control_chars: bool,
    /// Collapse whitespace runs to a single space and trim the text.
    ///
    /// Off by default: shingles are taken over the text exactly as supplied.
    pub normalize_whitespace: bool,
    /// Maximum accepted text size in bytes.
    pub max_text_bytes: Option<usize>,
    /// File extensions picked up when loading a directory (without the dot,
    /// compared case-insensitively). Empty means every file.
    pub extensions: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            version: 1,
            strip_control_chars: true,
            normalize_whitespace: false,
            max_text_bytes: None,
            extensions: vec!["txt".to_string()],
        }
    }
}

impl IngestConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 {
            return Err(ConfigError::InvalidVersion {
                version: self.version,
            });
        }
        if self.max_text_bytes == Some(0) {
            return Err(ConfigError::ZeroTextLimit);
        }
        if let Some(ext) = self
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(ConfigError::InvalidExtension(ext.clone()));
        }
        Ok(())
    }

    /// True when `ext` is one of the configured extensions.
    pub fn accepts_extension(&self, ext: Option<&str>) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        match ext {
            Some(ext) => self
                .extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid ingest config version {version}; expected >= 1")]
    InvalidVersion { version: u32 },

    #[error("max_text_bytes must be greater than zero when set")]
    ZeroTextLimit,

    #[error("invalid extension {0:?}; use a bare extension such as \"txt\"")]
    InvalidExtension(String),
}
