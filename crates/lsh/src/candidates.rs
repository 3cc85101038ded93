//! Candidate-pair detection over banded signatures.
//!
//! Every unordered pair of documents is visited once. Bands are compared by
//! position and the first identical band flags the pair; the remaining bands
//! are not looked at.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::banding::Band;
use crate::minhash::MinHashSignature;

/// A document reduced to its signature and bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandedDocument {
    pub id: String,
    pub signature: MinHashSignature,
    pub bands: Vec<Band>,
}

/// Two documents sharing at least one identical band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePair {
    /// Identifier of the document that comes first in input order.
    pub left: String,
    pub right: String,
    /// Position of the first matching band.
    pub band_index: usize,
    /// Values of the matching band (identical in both documents).
    pub band: Band,
    /// Fraction of equal signature elements. Diagnostic only.
    pub signature_agreement: f64,
}

impl CandidatePair {
    /// True when this pair joins `a` and `b`, in either order.
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.left == a && self.right == b) || (self.left == b && self.right == a)
    }
}

/// First band position at which `a` and `b` hold identical values.
///
/// Band lists of different lengths come from different banding setups and
/// never match.
pub fn first_matching_band(a: &[Band], b: &[Band]) -> Option<usize> {
    if a.len() != b.len() {
        return None;
    }
    a.iter().zip(b).position(|(x, y)| x == y)
}

/// Compare one pair. Returns `None` when no band matches.
pub fn compare_pair(a: &BandedDocument, b: &BandedDocument) -> Option<CandidatePair> {
    let band_index = first_matching_band(&a.bands, &b.bands)?;
    Some(CandidatePair {
        left: a.id.clone(),
        right: b.id.clone(),
        band_index,
        band: a.bands[band_index].clone(),
        signature_agreement: a.signature.agreement(&b.signature).unwrap_or(0.0),
    })
}

/// Check all `C(n, 2)` pairs of `docs`.
///
/// Pairs come out in combination order (`i < j` over input order), with or
/// without `use_parallel`.
pub fn detect_candidate_pairs(docs: &[BandedDocument], use_parallel: bool) -> Vec<CandidatePair> {
    let n = docs.len();
    if use_parallel {
        (0..n)
            .into_par_iter()
            .flat_map_iter(|i| ((i + 1)..n).filter_map(move |j| compare_pair(&docs[i], &docs[j])))
            .collect()
    } else {
        (0..n)
            .flat_map(|i| ((i + 1)..n).filter_map(move |j| compare_pair(&docs[i], &docs[j])))
            .collect()
    }
}
