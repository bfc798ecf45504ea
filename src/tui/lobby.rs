//! Lobby UI rendering
//!
//! Layout:
//! ┌─────────────────────────────────────────────────┐
//! │  SNATCH!                                        │
//! ├─────────────────────────────────────────────────┤
//! │  > Start New Game                               │
//! │    Join Game         [42_]                      │
//! │    Min Word Length   < 3 >                      │
//! │    Seat              < Player 1 >               │
//! │    Quit                                         │
//! │                                                 │
//! │  ↑↓ Navigate  ←→ Change  Enter Select  Esc Quit │
//! └─────────────────────────────────────────────────┘

use crate::app::{LobbyForm, LobbyOption};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Render the lobby screen
pub fn render_lobby(frame: &mut Frame, form: &LobbyForm) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(7),    // Options
            Constraint::Length(2), // Footer
        ])
        .margin(1)
        .split(area);

    let header = Paragraph::new("SNATCH!")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, layout[0]);

    let items: Vec<ListItem> = LobbyOption::all()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let style = if i == form.selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if i == form.selected { "> " } else { "  " };
            ListItem::new(format!("{}{:<18}{}", prefix, option.label(), option_value(form, *option)))
                .style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Room ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(list, layout[1]);

    let footer = Paragraph::new("↑↓ Navigate  ←→ Change  Type room id  Enter Select  Esc Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[2]);
}

/// Value column for a lobby row
fn option_value(form: &LobbyForm, option: LobbyOption) -> String {
    match option {
        LobbyOption::Join => format!("[{}_]", form.room_input),
        LobbyOption::MinWordLength => format!("< {} >", form.min_word_length()),
        LobbyOption::Seat => format!("< {} >", form.seat.label()),
        LobbyOption::StartNew | LobbyOption::Quit => String::new(),
    }
}
