//! Game logic: letter bag, board, word formation, snatching, scoring

pub mod board;
pub mod combination;
pub mod dictionary;
pub mod letters;
pub mod scoring;
pub mod snatch;
pub mod state;
pub mod stem;
pub mod validation;

pub use board::Board;
pub use dictionary::Dictionary;
pub use scoring::ScoringRule;
pub use snatch::{RejectReason, SnatchOutcome};
pub use state::{GameConfig, GameState, PlayerSlot};

use rand::prelude::*;

/// Tile counts per letter. Vowel-heavy so that short words keep
/// appearing on a 49-cell board.
pub const LETTER_DISTRIBUTION: [(char, usize); 26] = [
    ('A', 13),
    ('B', 3),
    ('C', 3),
    ('D', 6),
    ('E', 18),
    ('F', 3),
    ('G', 4),
    ('H', 3),
    ('I', 12),
    ('J', 2),
    ('K', 2),
    ('L', 5),
    ('M', 3),
    ('N', 8),
    ('O', 11),
    ('P', 3),
    ('Q', 2),
    ('R', 9),
    ('S', 6),
    ('T', 9),
    ('U', 6),
    ('V', 3),
    ('W', 3),
    ('X', 2),
    ('Y', 3),
    ('Z', 2),
];

/// Number of tiles in a full bag
pub const BAG_SIZE: usize = 144;

/// The shuffled draw pile.
///
/// Only ever shrinks during play; a reset replaces it with a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterBag {
    tiles: Vec<char>,
}

impl LetterBag {
    /// Generate a full, freshly shuffled bag from `rng`.
    pub fn generate_with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut tiles = Vec::with_capacity(BAG_SIZE);
        tiles.extend(
            LETTER_DISTRIBUTION
                .iter()
                .flat_map(|(letter, count)| std::iter::repeat_n(*letter, *count)),
        );

        // Fisher-Yates
        tiles.shuffle(rng);

        Self { tiles }
    }

    /// Take the last tile, or `None` once the bag is exhausted.
    pub fn draw(&mut self) -> Option<char> {
        self.tiles.pop()
    }

    /// Tiles remaining in draw order (last element is drawn next)
    pub fn tiles(&self) -> &[char] {
        &self.tiles
    }

    /// Number of tiles remaining
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check if the bag is exhausted
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
