//! Character k-shingling.
//!
//! A shingle is a run of `k` consecutive characters. Windows are taken over
//! Unicode scalar values, so multi-byte text never splits inside a character.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Unique shingles of one document.
///
/// Iteration is in lexicographic order, which keeps vocabulary construction
/// reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShingleSet {
    shingles: BTreeSet<String>,
}

impl ShingleSet {
    pub fn len(&self) -> usize {
        self.shingles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shingles.is_empty()
    }

    pub fn contains(&self, shingle: &str) -> bool {
        self.shingles.contains(shingle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.shingles.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ShingleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            shingles: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Collect every length-`k` window of `text` into a set.
///
/// Text shorter than `k` (and `k == 0`) yields an empty set.
pub fn shingle(text: &str, k: usize) -> ShingleSet {
    let chars: Vec<char> = text.chars().collect();
    if k == 0 || chars.len() < k {
        return ShingleSet::default();
    }
    chars
        .windows(k)
        .map(|window| window.iter().collect::<String>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shingle_repeating_text_dedups() {
        let set = shingle("abcabc", 3);
        let got: Vec<&str> = set.iter().collect();
        assert_eq!(got, vec!["abc", "bca", "cab"]);
    }

    #[test]
    fn shingle_near_duplicate_text() {
        let set = shingle("abcabd", 3);
        let got: Vec<&str> = set.iter().collect();
        assert_eq!(got, vec!["abc", "abd", "bca", "cab"]);
    }

    #[test]
    fn shingle_text_shorter_than_k_is_empty() {
        assert!(shingle("ab", 3).is_empty());
        assert!(shingle("", 3).is_empty());
    }

    #[test]
    fn shingle_k_zero_is_empty() {
        assert!(shingle("abc", 0).is_empty());
    }

    #[test]
    fn shingle_exact_length_yields_one() {
        let set = shingle("abc", 3);
        assert_eq!(set.len(), 1);
        assert!(set.contains("abc"));
    }

    #[test]
    fn shingle_count_is_bounded_by_window_count() {
        let text = "the quick brown fox jumps over the lazy dog";
        for k in 1..=10 {
            let set = shingle(text, k);
            assert!(set.len() <= text.chars().count() - k + 1);
        }
    }

    #[test]
    fn shingle_unique_windows_hit_the_bound() {
        let text = "abcdefghij";
        let set = shingle(text, 4);
        assert_eq!(set.len(), text.len() - 4 + 1);
    }

    #[test]
    fn shingle_counts_characters_not_bytes() {
        let set = shingle("héllo", 2);
        let got: Vec<&str> = set.iter().collect();
        assert_eq!(got, vec!["hé", "ll", "lo", "él"]);
        assert!(shingle("éé", 3).is_empty());
    }
}
