use crate::app::AppState;
use crate::tui::components::{campaign_bar, closed_modal, contact_pane, conversation_list, status_bar};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Menu width in columns; the contact pane takes the rest.
const MENU_WIDTH: u16 = 36;

pub fn draw(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Campaign bar
            Constraint::Min(3),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(MENU_WIDTH), Constraint::Min(20)])
        .split(chunks[1]);

    campaign_bar::render(frame, chunks[0], state);
    conversation_list::render(frame, horizontal[0], state);
    contact_pane::render(frame, horizontal[1], state);
    status_bar::render(frame, chunks[2], state);

    // Dialog on top of everything
    closed_modal::render(frame, state);
}
