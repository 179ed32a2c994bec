use crate::app::AppState;
use crate::config::KeyMode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mode = state.key_mode();
    let (badge, badge_bg) = match mode {
        KeyMode::Menu => (" TEXTING ", Color::Cyan),
        KeyMode::Dialog => (" PAUSED ", Color::Yellow),
    };

    let mut left_text = vec![
        Span::styled(
            badge,
            Style::default().fg(Color::Black).bg(badge_bg).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];
    left_text.extend(hints(state, mode));

    let right_text = match &state.ui.refresh_error {
        Some(_) => vec![Span::styled(
            "Couldn't refresh, showing last update",
            Style::default().fg(Color::Red),
        )],
        None => match state.data.conversations_refreshed_at.max(state.data.assignment_refreshed_at) {
            Some(at) => vec![Span::styled(
                format!("Updated {}", at.with_timezone(&chrono::Local).format("%H:%M:%S")),
                Style::default().fg(Color::Gray),
            )],
            None => Vec::new(),
        },
    };

    let left_len: usize = left_text.iter().map(|s| s.content.chars().count()).sum();
    let right_len: usize = right_text.iter().map(|s| s.content.chars().count()).sum();
    let padding = area.width.saturating_sub(left_len as u16 + right_len as u16 + 1);

    let mut spans = left_text;
    spans.push(Span::raw(" ".repeat(padding as usize)));
    spans.extend(right_text);
    spans.push(Span::raw(" "));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(paragraph, area);
}

fn hints(state: &AppState, mode: KeyMode) -> Vec<Span<'static>> {
    let actions: &[(&str, &str)] = match mode {
        KeyMode::Menu => &[
            ("next_conversation", "down"),
            ("prev_conversation", "up"),
            ("open_conversation", "open"),
            ("refresh", "refresh"),
            ("quit", "quit"),
        ],
        KeyMode::Dialog => &[("acknowledge", "ok")],
    };

    let mut spans = Vec::new();
    for (action, label) in actions {
        if let Some(key) = state.ui.keybindings.key_for(mode, action) {
            spans.push(Span::styled(key, Style::default().fg(Color::Cyan)));
            spans.push(Span::styled(format!(" {}  ", label), Style::default().fg(Color::Gray)));
        }
    }
    spans
}
