//! Scoring
//!
//! Scores are always recomputed from the word lists, never accumulated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a claimed word is converted into points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringRule {
    /// `length - minimum word length` per word (length − 3 in the
    /// standard three-letter game)
    #[default]
    MinusMinimum,
    /// Raw word length
    RawLength,
}

impl ScoringRule {
    /// All rules, in selection order
    pub fn all() -> &'static [ScoringRule] {
        &[ScoringRule::MinusMinimum, ScoringRule::RawLength]
    }

    /// Short name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            ScoringRule::MinusMinimum => "minus-minimum",
            ScoringRule::RawLength => "raw-length",
        }
    }

    /// Points for a single word
    pub fn word_points(&self, word: &str, min_word_length: usize) -> u32 {
        let length = word.chars().count();
        let points = match self {
            ScoringRule::MinusMinimum => length.saturating_sub(min_word_length),
            ScoringRule::RawLength => length,
        };
        points as u32
    }

    /// Score a whole word list
    pub fn score<S: AsRef<str>>(&self, words: &[S], min_word_length: usize) -> u32 {
        words
            .iter()
            .map(|w| self.word_points(w.as_ref(), min_word_length))
            .sum()
    }
}

impl fmt::Display for ScoringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScoringRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScoringRule::all()
            .iter()
            .copied()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| format!("unknown scoring rule: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_minus_three() {
        let words = ["CAT", "TALC", "CARTS"];
        // 0 + 1 + 2
        assert_eq!(ScoringRule::MinusMinimum.score(&words, 3), 3);
    }

    #[test]
    fn test_minimum_follows_configuration() {
        let words = ["TALC", "CARTS"];
        assert_eq!(ScoringRule::MinusMinimum.score(&words, 4), 1);
    }

    #[test]
    fn test_raw_length() {
        let words = ["CAT", "TALC"];
        assert_eq!(ScoringRule::RawLength.score(&words, 3), 7);
    }

    #[test]
    fn test_empty_list_scores_zero() {
        let words: [&str; 0] = [];
        for rule in ScoringRule::all() {
            assert_eq!(rule.score(&words, 3), 0);
        }
    }

    #[test]
    fn test_never_negative() {
        assert_eq!(ScoringRule::MinusMinimum.word_points("AB", 5), 0);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("raw-length".parse::<ScoringRule>(), Ok(ScoringRule::RawLength));
        assert_eq!(
            "minus-minimum".parse::<ScoringRule>(),
            Ok(ScoringRule::MinusMinimum)
        );
        assert!("bogus".parse::<ScoringRule>().is_err());
    }
}
