//! Word validation for Snatch
//!
//! Two separate questions:
//! - is the submission acceptable at all (length, dictionary)?
//! - can a word be spelled from the free tiles on the board?
//!
//! The second is the primitive every claim rule is built on.

use super::dictionary::Dictionary;
use super::letters::{contains, LetterCounts};

/// Default minimum word length
pub const MIN_WORD_LENGTH: usize = 3;

/// Outcome of the submission gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Word passes length and dictionary checks
    Valid,
    /// Word is shorter than the configured minimum
    TooShort { length: usize, minimum: usize },
    /// Word not found in dictionary
    NotInDictionary,
}


/// Check a submission against the minimum length and the dictionary.
///
/// Length is checked first and on the raw input; dictionary lookup is
/// case-insensitive.
pub fn validate_word(word: &str, min_word_length: usize, dictionary: &Dictionary) -> ValidationResult {
    let length = word.chars().count();
    if length < min_word_length {
        return ValidationResult::TooShort {
            length,
            minimum: min_word_length,
        };
    }

    if !dictionary.contains(word) {
        return ValidationResult::NotInDictionary;
    }

    ValidationResult::Valid
}

/// Check if `word` can be spelled using only the free tiles.
///
/// Empty input is never formable. Case-sensitive: normalize first.
pub fn is_formable(word: &str, free_tiles: &LetterCounts) -> bool {
    if word.is_empty() {
        return false;
    }
    contains(&LetterCounts::of_word(word), free_tiles)
}
