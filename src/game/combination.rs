//! Combination resolver
//!
//! Decides whether a new word can be built from an already claimed word
//! plus free board letters. Used twice per submission: against the
//! opponent's words (steal) and against the submitter's own (extend).

use super::letters::{contains, LetterCounts};
use super::stem::stem;
use super::validation::is_formable;

/// A successful recombination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    /// Index of the matched candidate in the list that was searched
    pub index: usize,
    /// The claimed word being recombined
    pub candidate: String,
    /// Letters that must come from the board
    pub remainder: LetterCounts,
}

/// Find the first candidate that `word` can be built from.
///
/// A candidate matches when
/// 1. its stem differs from the word's stem,
/// 2. all its letters fit inside the word, and
/// 3. the leftover letters are formable from `free_tiles`.
///
/// Candidates are tried in list order; the first match wins.
pub fn resolve<S: AsRef<str>>(
    word: &str,
    candidates: &[S],
    free_tiles: &LetterCounts,
) -> Option<Combination> {
    let word = word.to_uppercase();
    let word_counts = LetterCounts::of_word(&word);
    let word_stem = stem(&word);

    candidates.iter().enumerate().find_map(|(index, candidate)| {
        let candidate = candidate.as_ref();
        if stem(candidate) == word_stem {
            return None;
        }

        let candidate_counts = LetterCounts::of_word(candidate);
        if !contains(&candidate_counts, &word_counts) {
            return None;
        }

        let remainder = word_counts.minus(&candidate_counts);
        if !is_formable(&remainder.to_letters(), free_tiles) {
            return None;
        }

        Some(Combination {
            index,
            candidate: candidate.to_string(),
            remainder,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(letters: &str) -> LetterCounts {
        LetterCounts::of_word(letters)
    }

    #[test]
    fn test_cat_plus_l_makes_talc() {
        let found = resolve("TALC", &["CAT"], &tiles("LQZ")).unwrap();
        assert_eq!(found.candidate, "CAT");
        assert_eq!(found.index, 0);
        assert_eq!(found.remainder, tiles("L"));
    }

    #[test]
    fn test_lowercase_input_is_normalized() {
        assert!(resolve("cart", &["CAT"], &tiles("R")).is_some());
    }

    #[test]
    fn test_same_stem_is_skipped() {
        // CATS is just CAT inflected
        assert!(resolve("CATS", &["CAT"], &tiles("S")).is_none());
    }

    #[test]
    fn test_same_stem_does_not_stop_search() {
        let found = resolve("CATS", &["CAT", "ACT"], &tiles("S")).unwrap();
        assert_eq!(found.candidate, "ACT");
        assert_eq!(found.index, 1);
    }

    #[test]
    fn test_candidate_must_fit_inside_word() {
        assert!(resolve("TALC", &["DOG"], &tiles("TALC")).is_none());
    }

    #[test]
    fn test_remainder_must_be_on_board() {
        assert!(resolve("TALC", &["CAT"], &tiles("X")).is_none());
    }

    #[test]
    fn test_identical_letters_leave_empty_remainder() {
        // An anagram with a different stem still needs a board letter
        assert!(resolve("ACT", &["CAT"], &tiles("ACT")).is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let found = resolve("CARTS", &["ART", "CAT"], &tiles("CSR")).unwrap();
        assert_eq!(found.candidate, "ART");
        assert_eq!(found.remainder, tiles("CS"));
    }

    #[test]
    fn test_empty_candidate_list() {
        let none: [&str; 0] = [];
        assert!(resolve("CAT", &none, &tiles("CAT")).is_none());
    }
}
