use crate::app::AppState;
use crate::config::KeyMode;
use crate::tui::components::empty_state;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(current_id) = state.selected_id() else {
        empty_state::render(frame, area, state);
        return;
    };

    let block = Block::default()
        .title(" Contact ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(inner);

    let label = Style::default().fg(Color::Gray);
    let mut lines = Vec::new();

    match state.selected_conversation() {
        Some(conversation) => {
            lines.push(Line::from(Span::styled(
                conversation.display_name(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::styled("Status:   ", label),
                Span::styled(conversation.message_status.label(), Style::default().fg(Color::Cyan)),
            ]));
            if let Some(updated_at) = conversation.updated_at {
                lines.push(Line::from(vec![
                    Span::styled("Updated:  ", label),
                    Span::raw(updated_at.format("%Y-%m-%d %H:%M UTC").to_string()),
                ]));
            }
            if !conversation.is_eligible() {
                lines.push(Line::raw(""));
                lines.push(Line::from(Span::styled(
                    "This conversation is closed.",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        // Kept selection that dropped out of the latest snapshot
        None => {
            lines.push(Line::from(Span::styled(
                format!("Contact {}", current_id),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                "No longer in this assignment's list.",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    if let Some(next) = state
        .data
        .queue
        .next_id()
        .and_then(|id| state.conversations().iter().find(|c| c.id == id))
    {
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Next up:  ", label),
            Span::raw(next.display_name()),
        ]));
    }

    if state.more_batches_available() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "More contacts are available for this campaign.",
            Style::default().fg(Color::Green),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[0]);

    let keys = &state.ui.keybindings;
    let key_style = Style::default().fg(Color::Cyan);
    let hint_style = Style::default().fg(Color::DarkGray);
    let mut hints = Vec::new();
    for (action, text) in [("advance", " done, next contact  "), ("report_closed", " campaign closed")] {
        if let Some(key) = keys.key_for(KeyMode::Menu, action) {
            hints.push(Span::styled(key, key_style));
            hints.push(Span::styled(text, hint_style));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(hints)), chunks[1]);
}
