//! MinHash signatures over one-hot vectors.
//!
//! Element `j` of a signature is the active vocabulary index with the smallest
//! rank under permutation `j`. Two documents agree on element `j` with
//! probability equal to the Jaccard similarity of their shingle sets.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::LshError;
use crate::onehot::OneHotVector;
use crate::permutation::Permutation;

/// Fixed-length MinHash signature. Values are vocabulary indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MinHashSignature {
    values: Vec<usize>,
}

impl MinHashSignature {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[usize] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fraction of positions where both signatures hold the same index.
    ///
    /// This is the MinHash estimate of Jaccard similarity. Signatures of
    /// different lengths yield a `DimensionMismatch`.
    pub fn agreement(&self, other: &MinHashSignature) -> Result<f64, LshError> {
        if self.len() != other.len() {
            return Err(LshError::DimensionMismatch {
                expected: self.len(),
                got: other.len(),
            });
        }
        if self.is_empty() {
            return Ok(0.0);
        }
        let equal = self
            .values
            .iter()
            .zip(&other.values)
            .filter(|(a, b)| a == b)
            .count();
        Ok(equal as f64 / self.len() as f64)
    }
}

/// Compute the signature of `vector` under `permutations`.
///
/// Only the active bits are visited, so the cost is
/// O(permutations × active bits). With `use_parallel` the permutations are
/// spread over the Rayon pool; output is identical either way.
pub fn minhash_signature(
    vector: &OneHotVector,
    permutations: &[Permutation],
    use_parallel: bool,
) -> Result<MinHashSignature, LshError> {
    check_dimensions(vector, permutations)?;

    let active: Vec<usize> = vector.active_indices().collect();
    if active.is_empty() {
        return Err(LshError::EmptyDocumentSignature);
    }

    let mut values = Vec::with_capacity(permutations.len());
    if use_parallel {
        permutations
            .par_iter()
            .map(|perm| min_rank_index(&active, perm))
            .collect_into_vec(&mut values);
    } else {
        values.extend(permutations.iter().map(|perm| min_rank_index(&active, perm)));
    }

    Ok(MinHashSignature { values })
}

/// Reference definition: for each permutation walk ranks `1..=V` and take the
/// first index whose bit is set. O(permutations × V²) with the linear inverse
/// lookup; kept for verification.
pub fn minhash_signature_scan(
    vector: &OneHotVector,
    permutations: &[Permutation],
) -> Result<MinHashSignature, LshError> {
    check_dimensions(vector, permutations)?;

    let mut values = Vec::with_capacity(permutations.len());
    for perm in permutations {
        let found = (1..=perm.len())
            .filter_map(|rank| perm.index_of_rank(rank))
            .find(|&idx| vector.get(idx));
        match found {
            Some(idx) => values.push(idx),
            None => return Err(LshError::EmptyDocumentSignature),
        }
    }
    Ok(MinHashSignature { values })
}

fn check_dimensions(vector: &OneHotVector, permutations: &[Permutation]) -> Result<(), LshError> {
    if permutations.is_empty() {
        return Err(LshError::InvalidConfigHashes { num_hashes: 0 });
    }
    match permutations.iter().find(|perm| perm.len() != vector.len()) {
        Some(perm) => Err(LshError::DimensionMismatch {
            expected: vector.len(),
            got: perm.len(),
        }),
        None => Ok(()),
    }
}

/// Active index with the smallest rank. `active` must be non-empty.
#[inline]
fn min_rank_index(active: &[usize], perm: &Permutation) -> usize {
    let mut best = active[0];
    let mut best_rank = perm.rank(best);
    for &idx in &active[1..] {
        let rank = perm.rank(idx);
        if rank < best_rank {
            best = idx;
            best_rank = rank;
        }
    }
    best
}
