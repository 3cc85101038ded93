//! Shared shingle vocabulary.
//!
//! Indices are assigned once, on first sight, and never move. Every one-hot
//! vector and permutation of a run is sized and indexed against the same
//! vocabulary.

use std::collections::HashMap;

use crate::shingles::ShingleSet;

/// Append-only, ordered set of every shingle seen in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    shingles: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Union of `sets`, indexed in first-seen order.
    pub fn build<'a, I>(sets: I) -> Self
    where
        I: IntoIterator<Item = &'a ShingleSet>,
    {
        let mut vocab = Self::default();
        for set in sets {
            for shingle in set.iter() {
                vocab.insert(shingle);
            }
        }
        vocab
    }

    /// Add a shingle if it is new and return its index.
    pub fn insert(&mut self, shingle: &str) -> usize {
        if let Some(&idx) = self.index.get(shingle) {
            return idx;
        }
        let idx = self.shingles.len();
        self.shingles.push(shingle.to_owned());
        self.index.insert(shingle.to_owned(), idx);
        idx
    }

    pub fn index_of(&self, shingle: &str) -> Option<usize> {
        self.index.get(shingle).copied()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.shingles.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.shingles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shingles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.shingles.iter().map(String::as_str)
    }
}
