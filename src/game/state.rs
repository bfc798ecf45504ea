//! Per-room game state
//!
//! Mutated only by `flip` and `submit` (see `snatch.rs`), and replaced
//! wholesale by the session reducer whenever a broadcast arrives.

use super::board::{Board, BOARD_CELLS};
use super::scoring::ScoringRule;
use super::validation::MIN_WORD_LENGTH;
use super::LetterBag;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two seats at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    P1,
    P2,
}

impl PlayerSlot {
    /// Both seats in display order
    pub fn all() -> [PlayerSlot; 2] {
        [PlayerSlot::P1, PlayerSlot::P2]
    }

    /// The other seat
    pub fn opponent(self) -> PlayerSlot {
        match self {
            PlayerSlot::P1 => PlayerSlot::P2,
            PlayerSlot::P2 => PlayerSlot::P1,
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            PlayerSlot::P1 => "Player 1",
            PlayerSlot::P2 => "Player 2",
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerSlot::P1 => f.write_str("p1"),
            PlayerSlot::P2 => f.write_str("p2"),
        }
    }
}

/// Rules chosen in the lobby. Every broadcast carries the sender's rules,
/// so a room settles on whichever rules were broadcast last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Shortest word that may be claimed
    pub min_word_length: usize,
    /// How claimed words turn into points
    pub scoring: ScoringRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_word_length: MIN_WORD_LENGTH,
            scoring: ScoringRule::default(),
        }
    }
}

/// Where a flipped tile landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub letter: char,
    pub index: usize,
}

/// Scores for both seats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub p1: u32,
    pub p2: u32,
}

/// Complete local state for one room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(super) room: String,
    pub(super) config: GameConfig,
    pub(super) bag: LetterBag,
    pub(super) board: Board,
    pub(super) p1_words: Vec<String>,
    pub(super) p2_words: Vec<String>,
}

impl GameState {
    /// Fresh state: full bag shuffled with `rng`, empty board, no words
    pub fn new_with_rng<R: Rng + ?Sized>(
        room: impl Into<String>,
        config: GameConfig,
        rng: &mut R,
    ) -> Self {
        Self {
            room: room.into(),
            config,
            bag: LetterBag::generate_with_rng(rng),
            board: Board::new(),
            p1_words: Vec::new(),
            p2_words: Vec::new(),
        }
    }

    /// A fresh state for the same room and rules
    pub fn reset_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self::new_with_rng(self.room.clone(), self.config, rng)
    }

    /// Room identifier
    pub fn room(&self) -> &str {
        &self.room
    }

    /// Rules in force
    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// The local draw pile
    pub fn bag(&self) -> &LetterBag {
        &self.bag
    }

    /// The board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// A seat's claimed words, in claim order
    pub fn words(&self, slot: PlayerSlot) -> &[String] {
        match slot {
            PlayerSlot::P1 => &self.p1_words,
            PlayerSlot::P2 => &self.p2_words,
        }
    }

    pub(super) fn words_mut(&mut self, slot: PlayerSlot) -> &mut Vec<String> {
        match slot {
            PlayerSlot::P1 => &mut self.p1_words,
            PlayerSlot::P2 => &mut self.p2_words,
        }
    }

    /// A seat's score, derived from its word list
    pub fn score(&self, slot: PlayerSlot) -> u32 {
        self.config
            .scoring
            .score(self.words(slot), self.config.min_word_length)
    }

    /// Both scores
    pub fn scores(&self) -> Scores {
        Scores {
            p1: self.score(PlayerSlot::P1),
            p2: self.score(PlayerSlot::P2),
        }
    }

    /// Draw the next tile onto the lowest free cell.
    ///
    /// Nothing happens (and no tile is drawn) when the board is full or
    /// the bag is empty.
    pub fn flip(&mut self) -> Option<Placement> {
        let index = self.board.lowest_free_index(BOARD_CELLS)?;
        let letter = self.bag.draw()?;
        self.board.place_tile(letter, index);
        Some(Placement { letter, index })
    }

    /// Same state with the board replaced
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Same state under other rules
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Same state with both word lists replaced
    pub fn with_words(mut self, p1_words: Vec<String>, p2_words: Vec<String>) -> Self {
        self.p1_words = p1_words;
        self.p2_words = p2_words;
        self
    }
}
