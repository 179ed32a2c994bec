use crate::app::AppState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Shown in place of the contact pane when nothing is left to work.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let title = state
        .campaign()
        .map(|c| if c.title.is_empty() { format!("Campaign {}", c.id) } else { c.title.clone() })
        .unwrap_or_default();

    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(title, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))),
        Line::raw(""),
        Line::from(Span::styled(
            "You've finished all your contacts for now.",
            Style::default().fg(Color::White),
        )),
    ];

    let unsent = state.unsent_initial_count();
    if unsent > 0 {
        lines.push(Line::from(Span::styled(
            format!("{} contacts still need an initial message.", unsent),
            Style::default().fg(Color::Yellow),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
