//! Application screen state management
//!
//! Handles transitions between screens:
//! - Lobby: pick or type a room, minimum word length and seat
//! - Playing: the game view, owning the room session
//! - Error: relay unreachable or connection lost

use super::state::App;
use crate::game::dictionary::DictionarySource;
use crate::game::{Dictionary, GameConfig, PlayerSlot, ScoringRule};
use crate::session::Session;
use rand::Rng;
use tracing::{error, info, warn};

/// Minimum word lengths offered in the lobby
pub const MIN_LENGTH_CHOICES: [usize; 3] = [3, 4, 5];

/// Room ids for "start new" are drawn from `0..ROOM_ID_RANGE`
pub const ROOM_ID_RANGE: u32 = 1000;

/// Longest room id the lobby accepts
const MAX_ROOM_LEN: usize = 12;

/// Lobby rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyOption {
    StartNew,
    Join,
    MinWordLength,
    Seat,
    Quit,
}

impl LobbyOption {
    /// Get all lobby rows in order
    pub fn all() -> &'static [LobbyOption] {
        &[
            LobbyOption::StartNew,
            LobbyOption::Join,
            LobbyOption::MinWordLength,
            LobbyOption::Seat,
            LobbyOption::Quit,
        ]
    }

    /// Get the display label for this row
    pub fn label(&self) -> &'static str {
        match self {
            LobbyOption::StartNew => "Start New Game",
            LobbyOption::Join => "Join Game",
            LobbyOption::MinWordLength => "Min Word Length",
            LobbyOption::Seat => "Seat",
            LobbyOption::Quit => "Quit",
        }
    }
}

/// Lobby form contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyForm {
    /// Highlighted row
    pub selected: usize,
    /// Room id typed for "join"
    pub room_input: String,
    /// Index into [`MIN_LENGTH_CHOICES`]
    pub min_length_choice: usize,
    /// Seat to start in
    pub seat: PlayerSlot,
}

impl Default for LobbyForm {
    fn default() -> Self {
        Self {
            selected: 0,
            room_input: String::new(),
            min_length_choice: 0,
            seat: PlayerSlot::P1,
        }
    }
}

impl LobbyForm {
    /// Currently selected minimum word length
    pub fn min_word_length(&self) -> usize {
        MIN_LENGTH_CHOICES[self.min_length_choice]
    }

    /// Highlighted row
    pub fn option(&self) -> LobbyOption {
        LobbyOption::all()[self.selected]
    }
}

/// The current application screen
pub enum Screen {
    /// Room selection
    Lobby(LobbyForm),
    /// In a room
    Playing(Box<App>),
    /// Connection error
    Error { message: String },
}

/// Settings fixed for the whole run
#[derive(Debug, Clone)]
pub struct PlaySettings {
    /// Relay address
    pub server: String,
    /// Word-list source, loaded again on every room entry
    pub dictionary: Option<DictionarySource>,
    /// Scoring rule
    pub scoring: ScoringRule,
}

/// Main application coordinator
pub struct AppCoordinator {
    /// Current screen
    pub screen: Screen,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Run-wide settings
    settings: PlaySettings,
    /// Lobby choices, kept while a game is open
    form: LobbyForm,
}

impl AppCoordinator {
    /// Start at the lobby
    pub fn new(settings: PlaySettings, min_word_length: usize) -> Self {
        let min_length_choice = MIN_LENGTH_CHOICES
            .iter()
            .position(|n| *n == min_word_length)
            .unwrap_or_else(|| {
                warn!(
                    requested = min_word_length,
                    used = MIN_LENGTH_CHOICES[0],
                    "minimum word length not offered in the lobby"
                );
                0
            });
        let form = LobbyForm {
            min_length_choice,
            ..LobbyForm::default()
        };
        Self {
            screen: Screen::Lobby(form.clone()),
            should_quit: false,
            settings,
            form,
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Back to the lobby, dropping any open session
    pub fn go_to_lobby(&mut self) {
        if let Screen::Playing(app) = &self.screen {
            info!(room = app.session.room(), "left room");
            self.form.seat = app.seat;
        }
        self.screen = Screen::Lobby(self.form.clone());
    }

    /// Lobby navigation (up)
    pub fn lobby_up(&mut self) {
        if let Screen::Lobby(form) = &mut self.screen {
            form.selected = form.selected.saturating_sub(1);
        }
    }

    /// Lobby navigation (down)
    pub fn lobby_down(&mut self) {
        if let Screen::Lobby(form) = &mut self.screen {
            if form.selected < LobbyOption::all().len() - 1 {
                form.selected += 1;
            }
        }
    }

    /// Cycle the highlighted setting left or right
    pub fn lobby_cycle(&mut self, forward: bool) {
        if let Screen::Lobby(form) = &mut self.screen {
            match form.option() {
                LobbyOption::MinWordLength => {
                    let n = MIN_LENGTH_CHOICES.len();
                    form.min_length_choice = if forward {
                        (form.min_length_choice + 1) % n
                    } else {
                        (form.min_length_choice + n - 1) % n
                    };
                }
                LobbyOption::Seat => form.seat = form.seat.opponent(),
                _ => {}
            }
        }
    }

    /// Type into the room id field
    pub fn lobby_char(&mut self, c: char) {
        if let Screen::Lobby(form) = &mut self.screen {
            if c.is_ascii_alphanumeric() && form.room_input.len() < MAX_ROOM_LEN {
                form.room_input.push(c);
            }
        }
    }

    /// Delete from the room id field
    pub fn lobby_backspace(&mut self) {
        if let Screen::Lobby(form) = &mut self.screen {
            form.room_input.pop();
        }
    }

    /// Lobby selection (Enter)
    pub fn lobby_select(&mut self) {
        let form = match &self.screen {
            Screen::Lobby(form) => form.clone(),
            _ => return,
        };

        match form.option() {
            LobbyOption::StartNew => {
                let room = rand::rng().random_range(0..ROOM_ID_RANGE).to_string();
                self.enter_room(&room, &form);
            }
            LobbyOption::Join => {
                if !form.room_input.is_empty() {
                    self.enter_room(&form.room_input, &form);
                }
            }
            LobbyOption::MinWordLength | LobbyOption::Seat => self.lobby_cycle(true),
            LobbyOption::Quit => self.should_quit = true,
        }
    }

    /// Open the game view for `room` directly (skipping the lobby)
    pub fn open_room(&mut self, room: &str) {
        let form = self.form.clone();
        self.enter_room(room, &form);
    }

    fn enter_room(&mut self, room: &str, form: &LobbyForm) {
        self.form = form.clone();
        let config = GameConfig {
            min_word_length: form.min_word_length(),
            scoring: self.settings.scoring,
        };
        let dictionary = Dictionary::load_or_empty(self.settings.dictionary.as_ref());

        match Session::enter(&self.settings.server, room, config, dictionary) {
            Ok(session) => {
                self.screen = Screen::Playing(Box::new(App::new(session, form.seat)));
            }
            Err(e) => {
                error!(room, error = %e, "could not enter room");
                self.screen = Screen::Error {
                    message: e.to_string(),
                };
            }
        }
    }

    /// Poll for updates (call regularly)
    pub fn poll(&mut self) {
        if let Screen::Playing(app) = &mut self.screen {
            app.poll();
            if app.disconnected {
                self.screen = Screen::Error {
                    message: "Connection lost to relay".to_string(),
                };
            }
        }
    }
}
