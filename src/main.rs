//! Snatch - two-player anagram word game
//!
//! Flip tiles. Claim words. Steal your opponent's.

mod app;
mod cli;
mod game;
mod network;
mod session;
mod tui;

use app::{AppCoordinator, PlaySettings, Screen};
use clap::Parser;
use cli::{Cli, Command};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use game::dictionary::DictionarySource;
use network::Relay;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tui::Tui;

/// How long to wait for a key before polling the relay again
const INPUT_POLL: Duration = Duration::from_millis(50);

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Relay { host, port } => run_relay(&host, port),
        Command::Play {
            server,
            dictionary,
            room,
            min_word_length,
            scoring,
            log_file,
        } => {
            init_file_logging(&log_file)?;
            let settings = PlaySettings {
                server,
                dictionary: dictionary.as_deref().map(DictionarySource::parse),
                scoring,
            };
            run_play(settings, room.as_deref(), min_word_length)
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// The terminal belongs to the UI, so logs go to a file
fn init_file_logging(path: &Path) -> io::Result<()> {
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn run_relay(host: &str, port: u16) -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .init();

    let mut relay = Relay::bind(host, port)?;
    relay.run();
    Ok(())
}

fn run_play(settings: PlaySettings, room: Option<&str>, min_word_length: usize) -> io::Result<()> {
    info!(
        server = %settings.server,
        scoring = %settings.scoring,
        min_word_length,
        "starting"
    );

    let mut coordinator = AppCoordinator::new(settings, min_word_length);
    if let Some(room) = room {
        coordinator.open_room(room);
    }

    let mut terminal = Tui::start()?;

    loop {
        terminal.draw(|frame| tui::render(frame, &coordinator))?;

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut coordinator, key);
                }
            }
        }

        coordinator.poll();

        if coordinator.should_quit {
            break;
        }
    }

    // Terminal cleanup happens automatically via Tui::drop
    Ok(())
}

fn handle_key(coordinator: &mut AppCoordinator, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        coordinator.quit();
        return;
    }

    match coordinator.screen {
        Screen::Lobby(_) => match key.code {
            KeyCode::Esc => coordinator.quit(),
            KeyCode::Up => coordinator.lobby_up(),
            KeyCode::Down => coordinator.lobby_down(),
            KeyCode::Left => coordinator.lobby_cycle(false),
            KeyCode::Right => coordinator.lobby_cycle(true),
            KeyCode::Enter => coordinator.lobby_select(),
            KeyCode::Backspace => coordinator.lobby_backspace(),
            KeyCode::Char(c) => coordinator.lobby_char(c),
            _ => {}
        },
        Screen::Playing(_) if key.code == KeyCode::Esc => coordinator.go_to_lobby(),
        Screen::Playing(ref mut app) => match key.code {
            KeyCode::Char('n') if ctrl => app.request_reset(),
            KeyCode::Char(' ') => app.on_flip(),
            KeyCode::Enter => {
                app.on_submit();
            }
            KeyCode::Tab => app.switch_seat(),
            KeyCode::Backspace => app.on_backspace(),
            KeyCode::Char(c) => app.on_char(c),
            _ => {}
        },
        Screen::Error { .. } => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                coordinator.go_to_lobby();
            }
        }
    }
}
