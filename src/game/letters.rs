//! Letter multisets
//!
//! Every rule in the game reduces to one question: does one bag of
//! letters fit inside another? `LetterCounts` answers it.

use std::collections::BTreeMap;

/// A letter-frequency map. Zero counts are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterCounts {
    counts: BTreeMap<char, usize>,
}

impl LetterCounts {
    /// Create an empty multiset
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the letters of a word. No case folding happens here;
    /// callers normalize to uppercase first.
    pub fn of_word(word: &str) -> Self {
        word.chars().collect()
    }

    /// Add `n` occurrences of `letter`
    pub fn add(&mut self, letter: char, n: usize) {
        if n > 0 {
            *self.counts.entry(letter).or_insert(0) += n;
        }
    }

    /// Occurrences of `letter` (0 if absent)
    pub fn get(&self, letter: char) -> usize {
        self.counts.get(&letter).copied().unwrap_or(0)
    }

    /// True if no letters are held
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of letters, counting multiplicity
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate `(letter, count)` pairs in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts.iter().map(|(c, n)| (*c, *n))
    }

    /// Check if every letter here appears in `other` at least as often.
    ///
    /// Counter(TREE) is contained in Counter(STREET) but not in Counter(TERM).
    pub fn is_subset_of(&self, other: &LetterCounts) -> bool {
        self.counts
            .iter()
            .all(|(letter, count)| other.get(*letter) >= *count)
    }

    /// Letter-by-letter difference, keeping only strictly positive counts
    pub fn minus(&self, other: &LetterCounts) -> LetterCounts {
        let mut remainder = LetterCounts::new();
        for (letter, count) in self.iter() {
            remainder.add(letter, count.saturating_sub(other.get(letter)));
        }
        remainder
    }

    /// Expand back into a flat letter sequence (alphabetical order)
    pub fn to_letters(&self) -> String {
        self.iter()
            .flat_map(|(letter, count)| std::iter::repeat_n(letter, count))
            .collect()
    }
}

impl FromIterator<char> for LetterCounts {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut counts = LetterCounts::new();
        for c in iter {
            counts.add(c, 1);
        }
        counts
    }
}

impl FromIterator<(char, usize)> for LetterCounts {
    fn from_iter<I: IntoIterator<Item = (char, usize)>>(iter: I) -> Self {
        let mut counts = LetterCounts::new();
        for (c, n) in iter {
            counts.add(c, n);
        }
        counts
    }
}

/// Multiset containment: is `x` a subset of `y`?
pub fn contains(x: &LetterCounts, y: &LetterCounts) -> bool {
    x.is_subset_of(y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::btree_map;
    use proptest::prelude::*;

    fn counts(pairs: &[(char, usize)]) -> LetterCounts {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_of_word_counts_multiplicity() {
        let c = LetterCounts::of_word("STREET");
        assert_eq!(c.get('S'), 1);
        assert_eq!(c.get('T'), 2);
        assert_eq!(c.get('E'), 2);
        assert_eq!(c.get('X'), 0);
        assert_eq!(c.total(), 6);
    }

    #[test]
    fn test_tree_in_street_not_in_term() {
        let tree = LetterCounts::of_word("TREE");
        assert!(contains(&tree, &LetterCounts::of_word("STREET")));
        assert!(!contains(&tree, &LetterCounts::of_word("TERM")));
    }

    #[test]
    fn test_empty_edges() {
        let empty = LetterCounts::new();
        let cat = LetterCounts::of_word("CAT");
        assert!(contains(&empty, &cat));
        assert!(contains(&empty, &empty));
        assert!(!contains(&cat, &empty));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!contains(
            &LetterCounts::of_word("cat"),
            &LetterCounts::of_word("CAT")
        ));
    }

    #[test]
    fn test_minus_drops_non_positive() {
        let talc = LetterCounts::of_word("TALC");
        let cat = LetterCounts::of_word("CAT");
        let rest = talc.minus(&cat);
        assert_eq!(rest, counts(&[('L', 1)]));
        assert_eq!(rest.to_letters(), "L");

        // Subtracting more than present never goes negative
        assert!(cat.minus(&talc).is_empty());
    }

    #[test]
    fn test_zero_counts_not_stored() {
        let c = counts(&[('A', 0), ('B', 2)]);
        assert_eq!(c.iter().count(), 1);
        assert_eq!(c.to_letters(), "BB");
    }

    fn letter_map() -> impl Strategy<Value = LetterCounts> {
        btree_map(prop::char::range('A', 'F'), 1usize..4, 0..5)
            .prop_map(|m| m.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_contains_matches_definition(x in letter_map(), y in letter_map()) {
            let expected = x.iter().all(|(k, v)| y.get(k) > 0 && v <= y.get(k));
            prop_assert_eq!(contains(&x, &y), expected);
        }

        #[test]
        fn prop_empty_is_contained_everywhere(y in letter_map()) {
            prop_assert!(contains(&LetterCounts::new(), &y));
        }

        #[test]
        fn prop_nothing_but_empty_fits_in_empty(x in letter_map()) {
            prop_assert_eq!(contains(&x, &LetterCounts::new()), x.is_empty());
        }

        #[test]
        fn prop_minus_then_add_back(x in letter_map(), y in letter_map()) {
            // (x - y) is always contained in x
            prop_assert!(contains(&x.minus(&y), &x));
        }
    }
}
