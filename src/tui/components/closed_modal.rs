use crate::app::AppState;
use crate::config::KeyMode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Texting-closed dialog. Drawn whenever the session carries a warning.
pub fn render(frame: &mut Frame, state: &AppState) {
    let Some(reason) = state.warning() else {
        return;
    };

    let area = centered_rect(50, 30, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let accent = if reason.is_heads_up() { Color::Yellow } else { Color::Red };
    let block = Block::default()
        .title(format!(" {} ", reason.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(inner);

    let message = Paragraph::new(vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("⚠ ", Style::default().fg(accent)),
            Span::styled(reason.message(), Style::default().fg(Color::White)),
        ]),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(message, chunks[0]);

    let key = state
        .ui
        .keybindings
        .key_for(KeyMode::Dialog, "acknowledge")
        .unwrap_or_else(|| "Enter".to_string());
    let label = if reason.is_heads_up() { " Keep texting" } else { " Leave" };
    let help = Paragraph::new(Line::from(vec![
        Span::styled(format!("[{}]", key), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(label),
    ]));
    frame.render_widget(help, chunks[1]);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
