//! Game view state: the session plus what the player is typing

use crate::game::{PlayerSlot, SnatchOutcome};
use crate::session::{Session, SessionError};
use tracing::{debug, warn};

/// Longest word the input line accepts
pub const MAX_INPUT_LEN: usize = 20;

/// Shown once the bag runs dry
pub const NO_MORE_TILES: &str = "No more tiles!";

/// Main game view state
pub struct App {
    /// Room session
    pub session: Session,
    /// Seat the next submission is made for
    pub seat: PlayerSlot,
    /// Current user input
    pub input: String,
    /// Status line (never used for rejections, which stay silent)
    pub notice: Option<String>,
    /// Set when the relay connection failed
    pub disconnected: bool,
}

impl App {
    /// Open the game view on an entered session
    pub fn new(session: Session, seat: PlayerSlot) -> Self {
        Self {
            session,
            seat,
            input: String::new(),
            notice: None,
            disconnected: false,
        }
    }

    /// Handle a typed letter
    pub fn on_char(&mut self, c: char) {
        if c.is_ascii_alphabetic() && self.input.len() < MAX_INPUT_LEN {
            self.input.push(c.to_ascii_uppercase());
        }
    }

    /// Handle backspace
    pub fn on_backspace(&mut self) {
        self.input.pop();
    }

    /// Submit the input line for the current seat.
    ///
    /// The input is cleared either way; a rejected word simply does not
    /// show up.
    pub fn on_submit(&mut self) -> Option<SnatchOutcome> {
        if self.input.is_empty() {
            return None;
        }
        let word = std::mem::take(&mut self.input);
        let result = self.session.submit(self.seat, &word);
        let outcome = self.record(result)?;
        if outcome.is_accepted() {
            self.notice = None;
        }
        Some(outcome)
    }

    /// Flip the next tile
    pub fn on_flip(&mut self) {
        let result = self.session.flip();
        match self.record(result) {
            Some(Some(placed)) => {
                debug!(letter = %placed.letter, index = placed.index, "flipped");
                self.notice = None;
            }
            Some(None) if self.session.state().bag().is_empty() => {
                self.notice = Some(NO_MORE_TILES.to_string());
            }
            Some(None) => self.notice = Some("Board is full".to_string()),
            None => {}
        }
    }

    /// Swap to the other seat
    pub fn switch_seat(&mut self) {
        self.seat = self.seat.opponent();
    }

    /// Wipe the room for everyone
    pub fn request_reset(&mut self) {
        let result = self.session.reset();
        if self.record(result).is_some() {
            self.input.clear();
            self.notice = None;
        }
    }

    /// Apply inbound broadcasts
    pub fn poll(&mut self) {
        self.session.poll();
        if !self.session.is_connected() {
            self.disconnected = true;
        }
    }

    /// Check if the bag is exhausted
    pub fn out_of_tiles(&self) -> bool {
        self.session.state().bag().is_empty()
    }

    fn record<T>(&mut self, result: Result<T, SessionError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(room = self.session.room(), error = %e, "send failed");
                self.disconnected = true;
                None
            }
        }
    }
}
