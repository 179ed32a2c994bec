use crate::app::AppState;
use crate::models::{Conversation, MessageStatus};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let is_focused = !state.dialog_open();
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let conversations = state.conversations();
    let block = Block::default()
        .title(format!(" Conversations ({}) ", conversations.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let now = Utc::now();
    let selected_id = state.selected_id();
    let items: Vec<ListItem> = conversations
        .iter()
        .map(|c| create_conversation_item(c, selected_id == Some(c.id.as_str()), now))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)).add_modifier(Modifier::BOLD));

    let mut list_state = ListState::default();
    if !conversations.is_empty() {
        list_state.select(Some(state.ui.menu_cursor));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn create_conversation_item(conversation: &Conversation, is_current: bool, now: DateTime<Utc>) -> ListItem<'static> {
    let marker = if is_current { "▶ " } else { "  " };
    let badge_color = match conversation.message_status {
        MessageStatus::NeedsMessage => Color::Green,
        MessageStatus::NeedsResponse => Color::Yellow,
        MessageStatus::Convo => Color::Cyan,
        MessageStatus::Messaged => Color::Blue,
        MessageStatus::Closed => Color::DarkGray,
    };
    let name_style = if conversation.is_eligible() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    ListItem::new(Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Cyan)),
        Span::styled(format!("{:<5} ", conversation.message_status.badge()), Style::default().fg(badge_color)),
        Span::styled(conversation.display_name(), name_style),
        Span::styled(format!(" {}", age(conversation.updated_at, now)), Style::default().fg(Color::DarkGray)),
    ]))
}

/// Short relative age like "5m" or "2d".
fn age(updated_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(updated_at) = updated_at else {
        return String::new();
    };
    let duration = now.signed_duration_since(updated_at);
    if duration.num_days() > 0 {
        format!("{}d", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m", duration.num_minutes())
    } else {
        "now".to_string()
    }
}
