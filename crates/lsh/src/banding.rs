//! Band splitting for LSH.

use serde::{Deserialize, Serialize};

use crate::config::{band_width, LshError};
use crate::minhash::MinHashSignature;

/// One contiguous slice of a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Band(Vec<usize>);

impl Band {
    pub fn values(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Band {
    fn from(values: Vec<usize>) -> Self {
        Band(values)
    }
}

/// Split `signature` into `bands` equal-width, non-overlapping bands.
///
/// Band `b` covers elements `[b * r, (b + 1) * r)` where `r = len / bands`.
/// Fails with [`LshError::InvalidBandConfiguration`] when the signature is
/// empty or its length is not a multiple of `bands`.
pub fn split_into_bands(signature: &MinHashSignature, bands: usize) -> Result<Vec<Band>, LshError> {
    let rows = band_width(signature.len(), bands)?;
    Ok(signature
        .values()
        .chunks_exact(rows)
        .map(|chunk| Band(chunk.to_vec()))
        .collect())
}
