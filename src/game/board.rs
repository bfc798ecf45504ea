//! Board state: which letter sits in which cell
//!
//! Two views are kept in lockstep:
//! - `squares`: cell index -> letter
//! - `tiles`: letter -> cell indices holding it, in placement order
//!
//! Tiles of one letter are interchangeable, so removal needs a tie-break.
//! It is LIFO per letter: the most recently placed occurrence goes first.
//! That choice is visible (it decides which cell empties) and must stay.

use super::letters::LetterCounts;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Cells per row
pub const BOARD_WIDTH: usize = 7;

/// Rows on the board
pub const BOARD_HEIGHT: usize = 7;

/// Total cell count
pub const BOARD_CELLS: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// Row-major 2-D view of the board for display
pub type Layout = Vec<Vec<Option<char>>>;

/// The shared letter board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    squares: BTreeMap<usize, char>,
    tiles: BTreeMap<char, Vec<usize>>,
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a board from the `squares` view alone.
    ///
    /// Placement order is unknown here, so each letter's stack is ordered
    /// by ascending cell index.
    pub fn from_squares(squares: BTreeMap<usize, char>) -> Self {
        let mut tiles: BTreeMap<char, Vec<usize>> = BTreeMap::new();
        for (index, letter) in &squares {
            tiles.entry(*letter).or_default().push(*index);
        }
        Self { squares, tiles }
    }

    /// Build a board from both views, keeping the `tiles` order.
    ///
    /// Returns `None` if the views disagree.
    pub fn from_views(
        tiles: BTreeMap<char, Vec<usize>>,
        squares: BTreeMap<usize, char>,
    ) -> Option<Self> {
        let board = Self { squares, tiles };
        board.is_consistent().then_some(board)
    }

    /// The `squares` view
    pub fn squares(&self) -> &BTreeMap<usize, char> {
        &self.squares
    }

    /// The `tiles` view
    pub fn tiles(&self) -> &BTreeMap<char, Vec<usize>> {
        &self.tiles
    }

    /// Letter in a cell, if any
    pub fn letter_at(&self, index: usize) -> Option<char> {
        self.squares.get(&index).copied()
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// Check if no tiles are on the board
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Record `letter` at `index` in both views.
    ///
    /// Returns false (and changes nothing) if the cell is already taken.
    pub fn place_tile(&mut self, letter: char, index: usize) -> bool {
        if self.squares.contains_key(&index) {
            return false;
        }
        self.squares.insert(index, letter);
        self.tiles.entry(letter).or_default().push(index);
        true
    }

    /// First unoccupied index in `0..bound`, scanning upward
    pub fn lowest_free_index(&self, bound: usize) -> Option<usize> {
        (0..bound).find(|i| !self.squares.contains_key(i))
    }

    /// Pop the given number of occurrences of each letter, newest first,
    /// and clear their cells. Returns the cleared cell indices.
    ///
    /// `letters` must be contained in the free tiles; the snatch engine
    /// only calls this after validation succeeded.
    pub fn remove_occurrences(&mut self, letters: &LetterCounts) -> Vec<usize> {
        debug_assert!(
            letters.is_subset_of(&self.free_counts()),
            "removing letters that are not on the board"
        );

        let mut cleared = Vec::with_capacity(letters.total());
        for (letter, count) in letters.iter() {
            let Some(stack) = self.tiles.get_mut(&letter) else {
                continue;
            };
            for _ in 0..count {
                let Some(index) = stack.pop() else {
                    warn!(%letter, wanted = count, "fewer tiles on the board than requested");
                    break;
                };
                self.squares.remove(&index);
                cleared.push(index);
            }
            if stack.is_empty() {
                self.tiles.remove(&letter);
            }
        }
        cleared
    }

    /// Free-tile multiset: occurrences of each letter on the board
    pub fn free_counts(&self) -> LetterCounts {
        self.tiles
            .iter()
            .map(|(letter, cells)| (*letter, cells.len()))
            .collect()
    }

    /// Row layout for display. Pure; safe to call at any time.
    pub fn layout(&self) -> Layout {
        (0..BOARD_HEIGHT)
            .map(|row| {
                (0..BOARD_WIDTH)
                    .map(|col| self.letter_at(row * BOARD_WIDTH + col))
                    .collect()
            })
            .collect()
    }

    /// Both views describe the same cells: every occupied cell appears
    /// exactly once in its letter's stack, and no stack is empty
    pub fn is_consistent(&self) -> bool {
        let indexed: BTreeSet<usize> = self.tiles.values().flatten().copied().collect();
        let stacked: usize = self.tiles.values().map(Vec::len).sum();
        if stacked != indexed.len() || !indexed.iter().eq(self.squares.keys()) {
            return false;
        }
        self.tiles.iter().all(|(letter, cells)| {
            !cells.is_empty()
                && cells
                    .iter()
                    .all(|index| self.squares.get(index) == Some(letter))
        })
    }
}
