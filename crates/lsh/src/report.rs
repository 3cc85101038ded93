//! Run output: candidate pairs, per-document failures and run metadata.

use serde::{Deserialize, Serialize};

use crate::candidates::{BandedDocument, CandidatePair};
use crate::config::LshError;

/// A document that was dropped from candidate comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub id: String,
    /// Rendered error message.
    pub reason: String,
    #[serde(skip)]
    pub error: Option<LshError>,
}

impl DocumentFailure {
    pub fn new(id: impl Into<String>, error: LshError) -> Self {
        Self {
            id: id.into(),
            reason: error.to_string(),
            error: Some(error),
        }
    }
}

/// Parameters a run actually used, including the effective seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LshMeta {
    pub lsh_version: u16,
    pub algorithm_name: String,
    pub k: usize,
    pub num_hashes: usize,
    pub bands: usize,
    pub rows_per_band: usize,
    /// Seed the permutations were drawn from. Feeding it back through
    /// `LshConfig::seed` reproduces the run.
    pub seed: u64,
    pub use_parallel: bool,
    pub config_version: u32,
    pub vocabulary_size: usize,
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LshReport {
    /// Signatures and bands of the documents that made it through, in input
    /// order.
    pub documents: Vec<BandedDocument>,
    pub candidates: Vec<CandidatePair>,
    pub failures: Vec<DocumentFailure>,
    pub meta: LshMeta,
}

impl LshReport {
    /// True when `a` and `b` were reported as a candidate pair.
    pub fn is_candidate(&self, a: &str, b: &str) -> bool {
        self.candidates.iter().any(|pair| pair.joins(a, b))
    }

    pub fn failure_for(&self, id: &str) -> Option<&DocumentFailure> {
        self.failures.iter().find(|failure| failure.id == id)
    }

    pub fn document(&self, id: &str) -> Option<&BandedDocument> {
        self.documents.iter().find(|doc| doc.id == id)
    }
}
