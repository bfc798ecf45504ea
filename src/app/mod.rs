//! Application state and screen flow

pub mod screen;
pub mod state;

pub use screen::{AppCoordinator, LobbyForm, LobbyOption, PlaySettings, Screen};
pub use state::App;
