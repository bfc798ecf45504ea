//! Snatch engine: processes one word submission
//!
//! Rules are tried in strict priority order and the first success wins:
//! 1. fresh: spell the word from free tiles
//! 2. steal: recombine an opponent's word with free tiles
//! 3. extend: recombine one of your own words with free tiles
//!
//! The verdict is reached without touching state; only an accepted claim
//! is applied, so a rejection can never leave partial effects behind.

use super::combination::resolve;
use super::dictionary::Dictionary;
use super::letters::LetterCounts;
use super::state::{GameState, PlayerSlot};
use super::stem::stem;
use super::validation::{is_formable, validate_word, ValidationResult};
use std::fmt;
use tracing::debug;

/// Why a submission was turned down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Shorter than the configured minimum
    TooShort { length: usize, minimum: usize },
    /// Not in the dictionary
    NotInDictionary,
    /// Same letters and stem as a word someone already holds
    AlreadyClaimed { by: PlayerSlot },
    /// Neither fresh, steal nor extend works with the current board
    NoRule,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::TooShort { length, minimum } => {
                write!(f, "too short ({} chars, need {}+)", length, minimum)
            }
            RejectReason::NotInDictionary => f.write_str("not in dictionary"),
            RejectReason::AlreadyClaimed { by } => write!(f, "already held by {}", by),
            RejectReason::NoRule => f.write_str("cannot be formed"),
        }
    }
}

/// Result of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnatchOutcome {
    /// Spelled entirely from free tiles
    Fresh { word: String },
    /// Built from the opponent's word, which changes hands
    Steal {
        word: String,
        stolen: String,
        remainder: LetterCounts,
    },
    /// Built from one of the submitter's own words, which is replaced
    Extend {
        word: String,
        extended: String,
        remainder: LetterCounts,
    },
    /// Nothing changed
    Rejected { word: String, reason: RejectReason },
}

impl SnatchOutcome {
    /// Check if the claim went through
    pub fn is_accepted(&self) -> bool {
        !matches!(self, SnatchOutcome::Rejected { .. })
    }

    /// The (uppercased) word that was submitted
    pub fn word(&self) -> &str {
        match self {
            SnatchOutcome::Fresh { word }
            | SnatchOutcome::Steal { word, .. }
            | SnatchOutcome::Extend { word, .. }
            | SnatchOutcome::Rejected { word, .. } => word,
        }
    }
}

/// What an accepted claim does to the state
struct Claim {
    board_letters: LetterCounts,
    consumed: Option<(PlayerSlot, usize)>,
}

impl GameState {
    /// Process a word submission for `slot`.
    ///
    /// Rejections are silent at the game level: the state is left exactly
    /// as it was and the returned outcome says why.
    pub fn submit(&mut self, slot: PlayerSlot, word: &str, dictionary: &Dictionary) -> SnatchOutcome {
        let outcome = match self.judge(slot, word, dictionary) {
            Ok((claim, outcome)) => {
                self.apply_claim(slot, outcome.word(), claim);
                outcome
            }
            Err(reason) => SnatchOutcome::Rejected {
                word: word.to_uppercase(),
                reason,
            },
        };

        match &outcome {
            SnatchOutcome::Rejected { word, reason } => {
                debug!(room = %self.room, player = %slot, word = %word, %reason, "submission rejected");
            }
            SnatchOutcome::Fresh { word } => {
                debug!(room = %self.room, player = %slot, word = %word, "fresh claim");
            }
            SnatchOutcome::Steal { word, stolen, .. } => {
                debug!(room = %self.room, player = %slot, word = %word, stolen = %stolen, "steal");
            }
            SnatchOutcome::Extend { word, extended, .. } => {
                debug!(room = %self.room, player = %slot, word = %word, extended = %extended, "self-extend");
            }
        }

        outcome
    }

    fn judge(
        &self,
        slot: PlayerSlot,
        word: &str,
        dictionary: &Dictionary,
    ) -> Result<(Claim, SnatchOutcome), RejectReason> {
        match validate_word(word, self.config.min_word_length, dictionary) {
            ValidationResult::Valid => {}
            ValidationResult::TooShort { length, minimum } => {
                return Err(RejectReason::TooShort { length, minimum })
            }
            ValidationResult::NotInDictionary => return Err(RejectReason::NotInDictionary),
        }

        let word = word.to_uppercase();
        if let Some(by) = self.holder_of(&word) {
            return Err(RejectReason::AlreadyClaimed { by });
        }

        let free = self.board.free_counts();

        if is_formable(&word, &free) {
            let claim = Claim {
                board_letters: LetterCounts::of_word(&word),
                consumed: None,
            };
            return Ok((claim, SnatchOutcome::Fresh { word }));
        }

        let opponent = slot.opponent();
        if let Some(found) = resolve(&word, self.words(opponent), &free) {
            let claim = Claim {
                board_letters: found.remainder.clone(),
                consumed: Some((opponent, found.index)),
            };
            let outcome = SnatchOutcome::Steal {
                word,
                stolen: found.candidate,
                remainder: found.remainder,
            };
            return Ok((claim, outcome));
        }

        if let Some(found) = resolve(&word, self.words(slot), &free) {
            let claim = Claim {
                board_letters: found.remainder.clone(),
                consumed: Some((slot, found.index)),
            };
            let outcome = SnatchOutcome::Extend {
                word,
                extended: found.candidate,
                remainder: found.remainder,
            };
            return Ok((claim, outcome));
        }

        Err(RejectReason::NoRule)
    }

    /// Seat already holding a word with the same letters and stem
    fn holder_of(&self, word: &str) -> Option<PlayerSlot> {
        let counts = LetterCounts::of_word(word);
        let word_stem = stem(word);
        PlayerSlot::all().into_iter().find(|slot| {
            self.words(*slot)
                .iter()
                .any(|held| LetterCounts::of_word(held) == counts && stem(held) == word_stem)
        })
    }

    fn apply_claim(&mut self, slot: PlayerSlot, word: &str, claim: Claim) {
        self.board.remove_occurrences(&claim.board_letters);
        if let Some((owner, index)) = claim.consumed {
            self.words_mut(owner).remove(index);
        }
        self.words_mut(slot).push(word.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::GameConfig;
    use crate::game::Board;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dictionary() -> Dictionary {
        Dictionary::from_words([
            "CAT", "CATS", "TALC", "CART", "ACT", "TACT", "SCAT", "DOG", "GOD", "DOGS",
        ])
    }

    fn state_with(board: &str, p1: &[&str], p2: &[&str]) -> GameState {
        let mut b = Board::new();
        for (i, c) in board.chars().enumerate() {
            b.place_tile(c, i);
        }
        GameState::new_with_rng("7", GameConfig::default(), &mut StdRng::seed_from_u64(3))
            .with_board(b)
            .with_words(
                p1.iter().map(|w| w.to_string()).collect(),
                p2.iter().map(|w| w.to_string()).collect(),
            )
    }

    #[test]
    fn test_fresh_claim() {
        let mut state = state_with("CAT", &[], &[]);
        let outcome = state.submit(PlayerSlot::P1, "cat", &dictionary());

        assert_eq!(outcome, SnatchOutcome::Fresh { word: "CAT".to_string() });
        assert!(state.board().is_empty());
        assert_eq!(state.words(PlayerSlot::P1), ["CAT"]);
        assert!(state.words(PlayerSlot::P2).is_empty());
    }

    #[test]
    fn test_fresh_claim_leaves_other_tiles() {
        let mut state = state_with("XCATQ", &[], &[]);
        state.submit(PlayerSlot::P2, "CAT", &dictionary());
        assert_eq!(state.board().free_counts(), LetterCounts::of_word("XQ"));
        assert_eq!(state.board().letter_at(0), Some('X'));
        assert_eq!(state.board().letter_at(4), Some('Q'));
    }

    #[test]
    fn test_steal() {
        let mut state = state_with("LE", &[], &["CAT"]);
        let outcome = state.submit(PlayerSlot::P1, "TALC", &dictionary());

        assert!(matches!(
            &outcome,
            SnatchOutcome::Steal { stolen, .. } if stolen == "CAT"
        ));
        assert_eq!(state.words(PlayerSlot::P1), ["TALC"]);
        assert!(state.words(PlayerSlot::P2).is_empty());
        // Only the L left the board
        assert_eq!(state.board().free_counts(), LetterCounts::of_word("E"));
    }

    #[test]
    fn test_self_extend() {
        let mut state = state_with("R", &["DOG", "CAT"], &[]);
        let outcome = state.submit(PlayerSlot::P1, "CART", &dictionary());

        assert!(matches!(
            &outcome,
            SnatchOutcome::Extend { extended, .. } if extended == "CAT"
        ));
        assert_eq!(state.words(PlayerSlot::P1), ["DOG", "CART"]);
        assert!(state.board().is_empty());
    }

    #[test]
    fn test_steal_beats_extend() {
        let mut state = state_with("L", &["ACT"], &["CAT"]);
        let outcome = state.submit(PlayerSlot::P1, "TALC", &dictionary());

        assert!(matches!(outcome, SnatchOutcome::Steal { .. }));
        assert_eq!(state.words(PlayerSlot::P1), ["ACT", "TALC"]);
        assert!(state.words(PlayerSlot::P2).is_empty());
    }

    #[test]
    fn test_fresh_beats_extend() {
        // SCAT could extend CAT with an S, but is also on the board whole
        let mut state = state_with("SCAT", &["CAT"], &[]);
        let outcome = state.submit(PlayerSlot::P1, "SCAT", &dictionary());

        assert_eq!(outcome, SnatchOutcome::Fresh { word: "SCAT".to_string() });
        assert_eq!(state.words(PlayerSlot::P1), ["CAT", "SCAT"]);
        assert!(state.board().is_empty());
    }

    #[test]
    fn test_inflection_is_not_a_snatch() {
        let mut state = state_with("S", &[], &["CAT"]);
        let before = state.clone();
        let outcome = state.submit(PlayerSlot::P1, "CATS", &dictionary());

        assert!(matches!(
            outcome,
            SnatchOutcome::Rejected { reason: RejectReason::NoRule, .. }
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let mut state = state_with("CATDOG", &["ACT"], &["GOD"]);
        let before = state.clone();
        let dict = dictionary();

        let too_short = state.submit(PlayerSlot::P1, "CA", &dict);
        assert!(matches!(
            too_short,
            SnatchOutcome::Rejected { reason: RejectReason::TooShort { length: 2, minimum: 3 }, .. }
        ));

        let unknown = state.submit(PlayerSlot::P1, "TOGA", &dict);
        assert!(matches!(
            unknown,
            SnatchOutcome::Rejected { reason: RejectReason::NotInDictionary, .. }
        ));

        // GOD + S would work, but there is no S on the board
        let unformable = state.submit(PlayerSlot::P2, "DOGS", &dict);
        assert!(matches!(
            unformable,
            SnatchOutcome::Rejected { reason: RejectReason::NoRule, .. }
        ));

        assert_eq!(state, before);
        assert_eq!(state.scores(), before.scores());
    }

    #[test]
    fn test_duplicate_claim_rejected() {
        let mut state = state_with("CAT", &[], &["CAT"]);
        let before = state.clone();
        let outcome = state.submit(PlayerSlot::P1, "CAT", &dictionary());

        assert!(matches!(
            outcome,
            SnatchOutcome::Rejected { reason: RejectReason::AlreadyClaimed { by: PlayerSlot::P2 }, .. }
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_anagram_with_other_stem_is_not_duplicate() {
        let mut state = state_with("ACT", &[], &["CAT"]);
        let outcome = state.submit(PlayerSlot::P1, "ACT", &dictionary());
        assert_eq!(outcome, SnatchOutcome::Fresh { word: "ACT".to_string() });
    }

    #[test]
    fn test_min_word_length_config() {
        let mut state = state_with("CAT", &[], &[]);
        state.config.min_word_length = 4;
        let outcome = state.submit(PlayerSlot::P1, "CAT", &dictionary());
        assert!(matches!(
            outcome,
            SnatchOutcome::Rejected { reason: RejectReason::TooShort { .. }, .. }
        ));
        assert!(state.words(PlayerSlot::P1).is_empty());
    }

    #[test]
    fn test_scores_follow_word_lists() {
        let mut state = state_with("TALCDOGS", &[], &[]);
        let dict = dictionary();
        state.submit(PlayerSlot::P1, "TALC", &dict);
        state.submit(PlayerSlot::P2, "DOGS", &dict);
        assert_eq!(state.score(PlayerSlot::P1), 1);
        assert_eq!(state.score(PlayerSlot::P2), 1);
    }
}
