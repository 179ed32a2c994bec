use crate::app::AppState;
use crate::session::SessionStatus;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    if area.width == 0 {
        return;
    }

    let mut spans = Vec::new();

    match state.campaign() {
        Some(campaign) => {
            let title = if campaign.title.is_empty() {
                format!("Campaign {}", campaign.id)
            } else {
                campaign.title.clone()
            };
            spans.push(Span::styled(
                format!(" {} ", title),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
        }
        None => {
            // Waiting on the first assignment snapshot
            let frame_idx = state.system.animation_frame % SPINNER.len();
            spans.push(Span::styled(
                format!(" {} Loading assignment ", SPINNER[frame_idx]),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    if let Some(texter) = state
        .data
        .assignment
        .as_ref()
        .map(|a| &a.texter)
        .filter(|t| !t.display_name.is_empty())
    {
        spans.push(Span::styled(
            format!("· {} ", texter.display_name),
            Style::default().fg(Color::Gray),
        ));
    }

    if let Some(status) = state.session_status() {
        let color = match status {
            SessionStatus::Active => Color::Green,
            SessionStatus::WarnAlmostClosed | SessionStatus::WarnFiveMin => Color::Yellow,
            SessionStatus::WarnOutsideHours | SessionStatus::BlockedCampaignClosed => Color::Red,
            SessionStatus::Ended => Color::DarkGray,
        };
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}
