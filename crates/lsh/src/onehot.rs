//! One-hot presence vectors over the run vocabulary.

use serde::{Deserialize, Serialize};

use crate::shingles::ShingleSet;
use crate::vocabulary::Vocabulary;

/// Bit `i` is set iff `vocabulary[i]` occurs in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHotVector {
    bits: Vec<bool>,
}

impl OneHotVector {
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, idx: usize) -> bool {
        self.bits.get(idx).copied().unwrap_or(false)
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Indices of set bits, ascending.
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(idx, &bit)| bit.then_some(idx))
    }

    pub fn count_active(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }
}

/// Encode `set` against `vocabulary`. O(|vocabulary|).
pub fn encode(vocabulary: &Vocabulary, set: &ShingleSet) -> OneHotVector {
    OneHotVector {
        bits: vocabulary.iter().map(|shingle| set.contains(shingle)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shingles::shingle;

    #[test]
    fn encode_marks_members() {
        let a = shingle("abcabc", 3);
        let b = shingle("abcabd", 3);
        let vocab = Vocabulary::build([&a, &b]);

        // vocabulary order: abc, bca, cab, abd
        assert_eq!(encode(&vocab, &a).bits(), &[true, true, true, false]);
        assert_eq!(encode(&vocab, &b).bits(), &[true, true, true, true]);
    }

    #[test]
    fn encode_length_matches_vocabulary() {
        let a = shingle("hello world", 3);
        let b = shingle("goodbye world", 3);
        let c = shingle("xy", 3);
        let vocab = Vocabulary::build([&a, &b, &c]);

        for set in [&a, &b, &c] {
            assert_eq!(encode(&vocab, set).len(), vocab.len());
        }
    }

    #[test]
    fn encode_bits_agree_with_membership() {
        let a = shingle("the quick brown fox", 3);
        let b = shingle("the quick red fox", 3);
        let vocab = Vocabulary::build([&a, &b]);
        let vector = encode(&vocab, &b);

        for (idx, shingle) in vocab.iter().enumerate() {
            assert_eq!(vector.get(idx), b.contains(shingle));
        }
        assert_eq!(vector.count_active(), b.len());
    }

    #[test]
    fn encode_empty_set_is_all_zero() {
        let a = shingle("abcdef", 3);
        let empty = shingle("ab", 3);
        let vocab = Vocabulary::build([&a, &empty]);
        let vector = encode(&vocab, &empty);

        assert_eq!(vector.len(), 4);
        assert_eq!(vector.active_indices().count(), 0);
    }

    #[test]
    fn active_indices_are_ascending() {
        let vector = OneHotVector::from_bits(vec![false, true, false, true, true]);
        let active: Vec<usize> = vector.active_indices().collect();
        assert_eq!(active, vec![1, 3, 4]);
        assert!(!vector.get(99));
    }
}
