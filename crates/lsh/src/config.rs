//! Configuration and error types for the LSH pipeline.
//!
//! The configuration is a plain value with no I/O attached, so every stage of
//! the pipeline is a pure function of `(documents, config, seed)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunables for shingling, MinHash and banding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LshConfig {
    /// Configuration schema version.
    pub version: u32,
    /// Shingle length in characters.
    pub k: usize,
    /// Number of permutations, which is also the signature length.
    pub num_hashes: usize,
    /// Number of bands the signature is split into.
    ///
    /// `num_hashes` must be divisible by `bands`.
    pub bands: usize,
    /// Seed for permutation generation.
    ///
    /// `None` draws a fresh seed for every run. Set it to make runs
    /// reproducible.
    pub seed: Option<u64>,
    /// Compute signatures and compare pairs on the Rayon pool.
    pub use_parallel: bool,
}

impl LshConfig {
    /// Create a new configuration with the default tunables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shingle size (k).
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the number of permutations (signature length).
    pub fn with_num_hashes(mut self, num_hashes: usize) -> Self {
        self.num_hashes = num_hashes;
        self
    }

    /// Set the number of bands.
    /// More bands with fewer rows each raise recall and lower precision.
    pub fn with_bands(mut self, bands: usize) -> Self {
        self.bands = bands;
        self
    }

    /// Fix the permutation seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Width of each band (`num_hashes / bands`).
    pub fn rows_per_band(&self) -> Result<usize, LshError> {
        band_width(self.num_hashes, self.bands)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), LshError> {
        if self.version < 1 {
            return Err(LshError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.k < 1 {
            return Err(LshError::InvalidConfigK { k: self.k });
        }
        if self.num_hashes < 1 {
            return Err(LshError::InvalidConfigHashes {
                num_hashes: self.num_hashes,
            });
        }
        self.rows_per_band().map(|_| ())
    }
}

impl Default for LshConfig {
    fn default() -> Self {
        Self {
            version: 1,
            k: 3,
            num_hashes: 20,
            bands: 10,
            seed: None,
            use_parallel: false,
        }
    }
}

/// Band width for a signature of `len` values split into `bands` bands.
pub(crate) fn band_width(len: usize, bands: usize) -> Result<usize, LshError> {
    if len == 0 || bands == 0 || len % bands != 0 {
        return Err(LshError::InvalidBandConfiguration {
            signature_len: len,
            bands,
        });
    }
    Ok(len / bands)
}

/// Errors returned by the LSH pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LshError {
    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("invalid config: k must be >= 1 (got {k})")]
    InvalidConfigK { k: usize },

    #[error("invalid config: num_hashes must be >= 1 (got {num_hashes})")]
    InvalidConfigHashes { num_hashes: usize },

    /// The signature length is not a multiple of the band count.
    #[error("invalid band configuration: signature length {signature_len} is not divisible into {bands} bands")]
    InvalidBandConfiguration { signature_len: usize, bands: usize },

    /// The document has no shingles, so no permutation has an active index.
    #[error("document has no shingles; MinHash signature is undefined")]
    EmptyDocumentSignature,

    #[error("dimension mismatch (expected {expected}, got {got})")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl LshError {
    /// True for errors that only concern a single document and leave the
    /// rest of the run intact.
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            LshError::EmptyDocumentSignature | LshError::MalformedInput(_)
        )
    }
}
