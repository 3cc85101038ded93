//! Random permutations standing in for MinHash hash functions.
//!
//! Each permutation is a uniform shuffle of the ranks `1..=V`, where `V` is the
//! vocabulary size. Position `i` holds the rank of vocabulary index `i`.
//! Randomness comes from an explicitly seeded [`fastrand::Rng`], so a run is
//! reproducible from its seed alone.

use serde::{Deserialize, Serialize};

/// A bijection from vocabulary indices to ranks `1..=V`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permutation {
    ranks: Vec<usize>,
}

impl Permutation {
    /// Wrap an explicit rank table. Returns `None` unless `ranks` holds each of
    /// `1..=ranks.len()` exactly once.
    pub fn from_ranks(ranks: Vec<usize>) -> Option<Self> {
        let perm = Self { ranks };
        perm.is_bijection().then_some(perm)
    }

    /// The identity permutation of size `len`.
    pub fn identity(len: usize) -> Self {
        Self {
            ranks: (1..=len).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Rank assigned to vocabulary index `idx`.
    #[inline]
    pub fn rank(&self, idx: usize) -> usize {
        self.ranks[idx]
    }

    /// Vocabulary index holding `rank`. Linear scan.
    pub fn index_of_rank(&self, rank: usize) -> Option<usize> {
        self.ranks.iter().position(|&r| r == rank)
    }

    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// True iff the ranks are exactly `1..=len`, each once.
    pub fn is_bijection(&self) -> bool {
        let mut seen = vec![false; self.ranks.len()];
        for &rank in &self.ranks {
            if rank == 0 || rank > seen.len() || seen[rank - 1] {
                return false;
            }
            seen[rank - 1] = true;
        }
        true
    }
}

/// Generates the permutation family for a run.
#[derive(Debug)]
pub struct PermutationHasher {
    rng: fastrand::Rng,
}

impl PermutationHasher {
    /// Deterministic generator for the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Use a caller-supplied generator.
    pub fn from_rng(rng: fastrand::Rng) -> Self {
        Self { rng }
    }

    /// One uniform shuffle of `1..=vocab_size`.
    pub fn permutation(&mut self, vocab_size: usize) -> Permutation {
        let mut ranks: Vec<usize> = (1..=vocab_size).collect();
        self.rng.shuffle(&mut ranks);
        Permutation { ranks }
    }

    /// `count` independent permutations of `1..=vocab_size`.
    pub fn generate(&mut self, vocab_size: usize, count: usize) -> Vec<Permutation> {
        (0..count).map(|_| self.permutation(vocab_size)).collect()
    }
}
