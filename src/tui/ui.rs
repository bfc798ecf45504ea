//! UI rendering using ratatui
//!
//! Screens:
//! - Lobby: see `lobby.rs`
//! - Playing: board, both word lists with scores, input line
//! - Error: error message display

use super::lobby::render_lobby;
use crate::app::{App, AppCoordinator, Screen};
use crate::game::board::BOARD_WIDTH;
use crate::game::{Board, GameState, PlayerSlot};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Render the appropriate screen based on app state
pub fn render(frame: &mut Frame, coordinator: &AppCoordinator) {
    match &coordinator.screen {
        Screen::Lobby(form) => render_lobby(frame, form),
        Screen::Playing(app) => render_game(frame, app),
        Screen::Error { message } => render_error(frame, message),
    }
}

/// Render the game view
fn render_game(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let state = app.session.state();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Board and word lists
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, layout[0], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(24),    // Player 1
            Constraint::Length(24), // Board
            Constraint::Min(24),    // Player 2
        ])
        .split(layout[1]);

    render_words(frame, columns[0], state, PlayerSlot::P1, app.seat);
    render_board(frame, columns[1], state.board());
    render_words(frame, columns[2], state, PlayerSlot::P2, app.seat);

    render_input(frame, layout[2], app);

    let footer = Paragraph::new("Space Flip  Enter Submit  Tab Switch seat  Ctrl-N Reset  Esc Lobby")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[3]);
}

/// Header: title, room, tiles left
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(10), // Logo
            Constraint::Min(10),    // Room
            Constraint::Length(16), // Bag
        ])
        .split(inner);

    let logo = Paragraph::new("SNATCH!")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Left);
    frame.render_widget(logo, header_layout[0]);

    let room = Paragraph::new(format!("Room {}", app.session.room()))
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center);
    frame.render_widget(room, header_layout[1]);

    let left = app.session.state().bag().len();
    let bag = Paragraph::new(format!("{} tiles left", left))
        .style(Style::default().fg(if left == 0 { Color::Red } else { Color::Green }))
        .alignment(Alignment::Right);
    frame.render_widget(bag, header_layout[2]);
}

/// The 7x7 letter grid
fn render_board(frame: &mut Frame, area: Rect, board: &Board) {
    let lines: Vec<Line> = board_lines(board)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, Style::default().fg(Color::White).bold())))
        .collect();

    let grid = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Board ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(grid, area);
}

/// One player's word list and score
fn render_words(frame: &mut Frame, area: Rect, state: &GameState, slot: PlayerSlot, seat: PlayerSlot) {
    let items: Vec<ListItem> = state
        .words(slot)
        .iter()
        .map(|word| ListItem::new(format!("  {}", word)))
        .collect();

    let marker = if slot == seat { "▶ " } else { "" };
    let title = format!(" {}{}: {} ", marker, slot.label(), state.score(slot));
    let border = if slot == seat { Color::Green } else { Color::DarkGray };

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(list, area);
}

/// Input line, with the notice (if any) in the title
fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let notice = if app.out_of_tiles() {
        Some(crate::app::state::NO_MORE_TILES)
    } else {
        app.notice.as_deref()
    };
    let title = match notice {
        Some(text) => format!(" {} as {} ", text, app.seat.label()),
        None => format!(" {} ", app.seat.label()),
    };

    let input = Paragraph::new(format!("> {}_", app.input))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(input, area);
}

/// Render error screen
fn render_error(frame: &mut Frame, message: &str) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Percentage(40),
        ])
        .margin(2)
        .split(area);

    let error = Paragraph::new(format!("Error: {}", message))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
    frame.render_widget(error, layout[1]);

    let hint = Paragraph::new("Press Esc to go back")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hint, layout[2]);
}

/// Board rows as text, `·` for an empty cell
fn board_lines(board: &Board) -> Vec<String> {
    board
        .layout()
        .iter()
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or("·".to_string(), |c| c.to_string()))
                .collect();
            debug_assert_eq!(cells.len(), BOARD_WIDTH);
            cells.join("  ")
        })
        .collect()
}
