//! Headless summary of what a session would do with the current data.

use std::fmt::Write as _;

use anyhow::Result;

use crate::models::{Assignment, Conversation};
use crate::queue::ConversationQueue;
use crate::session::machine::{self, Effect, Exit};
use crate::session::{HoursPolicy, WindowReading};
use crate::source::{AssignmentSource, ConversationSource};

/// Build the report for one fetch of both sources.
pub fn report(
    conversations: &dyn ConversationSource,
    assignments: &dyn AssignmentSource,
    policy: &dyn HoursPolicy,
    organization_override: Option<&str>,
) -> Result<String> {
    let assignment = assignments.fetch_assignment()?;
    let queue = ConversationQueue::new(conversations.fetch_conversations()?);

    let mut out = String::new();
    write_session(&mut out, assignment.as_ref(), policy, organization_override)?;
    writeln!(out)?;
    write_queue(&mut out, &queue, assignment.as_ref())?;
    Ok(out)
}

pub fn run_inspect(
    conversations: &dyn ConversationSource,
    assignments: &dyn AssignmentSource,
    policy: &dyn HoursPolicy,
    organization_override: Option<&str>,
) -> Result<()> {
    print!("{}", report(conversations, assignments, policy, organization_override)?);
    Ok(())
}

fn write_session(
    out: &mut String,
    assignment: Option<&Assignment>,
    policy: &dyn HoursPolicy,
    organization_override: Option<&str>,
) -> Result<()> {
    let Some(assignment) = assignment else {
        writeln!(out, "Assignment: none yet (session start deferred)")?;
        return Ok(());
    };
    let campaign = &assignment.campaign;
    let organization = organization_override.unwrap_or(&campaign.organization_id);

    writeln!(out, "Assignment: {}", assignment.id)?;
    writeln!(
        out,
        "Campaign:   {} {} ({:?}{})",
        campaign.id,
        campaign.title,
        campaign.status,
        if campaign.is_archived { ", archived" } else { "" }
    )?;

    let reading = WindowReading::read(policy, campaign);
    match reading.remaining_millis {
        Some(ms) if reading.within_hours => writeln!(out, "Window:     open, {} left", format_millis(ms))?,
        _ => writeln!(out, "Window:     closed")?,
    }

    let transition = machine::start(campaign, reading);
    writeln!(out, "Session:    {}", transition.state.status)?;
    if let Some(reason) = transition.state.status.warning() {
        writeln!(out, "Dialog:     {}: {}", reason.title(), reason.message())?;
    }
    for effect in &transition.effects {
        match effect {
            Effect::Arm { purpose, after } => {
                writeln!(out, "Timer:      {:?} in {}", purpose, format_millis(after.as_millis() as i64))?
            }
            Effect::CancelAllTimers => writeln!(out, "Timers:     cancelled")?,
            Effect::Navigate(Exit::Todos) => writeln!(out, "Exit:       /app/{}/todos", organization)?,
            Effect::Navigate(Exit::Home) => writeln!(out, "Exit:       /app/{}", organization)?,
        }
    }
    Ok(())
}

fn write_queue(out: &mut String, queue: &ConversationQueue, assignment: Option<&Assignment>) -> Result<()> {
    let conversations = queue.conversations();
    writeln!(out, "Conversations ({}):", conversations.len())?;
    for conversation in conversations {
        let marker = if queue.current_id() == Some(conversation.id.as_str()) {
            ">"
        } else {
            " "
        };
        writeln!(out, "{} {}", marker, conversation_line(conversation))?;
    }

    match queue.current() {
        Some(current) => writeln!(out, "Current:    {}", current.display_name())?,
        None => writeln!(out, "Current:    none, nothing left to work")?,
    }
    if let Some(next) = queue.next_id() {
        writeln!(out, "Next:       {}", next)?;
    }
    writeln!(out, "Unsent:     {}", queue.unsent_initial_count(assignment))?;
    if queue.more_batches_available(assignment.map(|a| &a.campaign)) {
        writeln!(out, "More contacts can be requested for this campaign.")?;
    }
    Ok(())
}

fn conversation_line(conversation: &Conversation) -> String {
    let updated = conversation
        .updated_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<6} {:<24} {}",
        conversation.message_status.badge(),
        conversation.display_name(),
        updated
    )
}

/// `5m 30s` style duration.
pub fn format_millis(ms: i64) -> String {
    let secs = ms.max(0) / 1000;
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h {}m", h, m)
    } else if m > 0 {
        format!("{}m {}s", m, s)
    } else {
        format!("{}s", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CampaignHoursPolicy;
    use crate::source::FileSource;
    use chrono::{TimeZone, Utc};
    use std::fs;
    use tempfile::TempDir;

    fn write_fixtures(dir: &TempDir, assignment: &str) -> FileSource {
        fs::write(dir.path().join("assignment.json"), assignment).unwrap();
        fs::write(
            dir.path().join("conversations.json"),
            r#"[
                { "id": "1", "messageStatus": "closed", "firstName": "Ada", "lastName": "L", "updatedAt": "2024-06-01T12:05:00Z" },
                { "id": "2", "messageStatus": "needsMessage", "firstName": "Grace", "lastName": "H", "updatedAt": "2024-06-01T12:01:00Z" }
            ]"#,
        )
        .unwrap();
        FileSource::new(dir.path().join("assignment.json"), dir.path().join("conversations.json"))
    }

    #[test]
    fn test_report_active_session() {
        let dir = TempDir::new().unwrap();
        let source = write_fixtures(&dir, r#"{ "id": "a1", "campaign": { "id": "c1", "title": "GOTV", "organizationId": "4" } }"#);
        // 20:53:20 UTC leaves 400s before the 21:00 close.
        let policy = CampaignHoursPolicy::at(Utc.with_ymd_and_hms(2024, 6, 1, 20, 53, 20).unwrap());

        let out = report(&source, &source, &policy, None).unwrap();
        assert!(out.contains("Window:     open, 6m 40s left"), "{}", out);
        assert!(out.contains("Session:    ACTIVE"), "{}", out);
        assert!(out.contains("Timer:      FiveMinuteWarning in 1m 40s"), "{}", out);
        assert!(out.contains("> NEW"), "{}", out);
        assert!(out.contains("Current:    Grace H"), "{}", out);
        assert!(out.contains("Unsent:     1"), "{}", out);
    }

    #[test]
    fn test_report_archived_campaign_exit() {
        let dir = TempDir::new().unwrap();
        let source = write_fixtures(
            &dir,
            r#"{ "id": "a1", "campaign": { "id": "c1", "isArchived": true, "organizationId": "4" } }"#,
        );
        let policy = CampaignHoursPolicy::at(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());

        let out = report(&source, &source, &policy, Some("override")).unwrap();
        assert!(out.contains("Exit:       /app/override/todos"), "{}", out);
    }

    #[test]
    fn test_report_without_assignment() {
        let dir = TempDir::new().unwrap();
        let source = FileSource::new(dir.path().join("missing.json"), dir.path().join("missing-too.json"));
        let policy = CampaignHoursPolicy::new();

        let out = report(&source, &source, &policy, None).unwrap();
        assert!(out.contains("session start deferred"));
        assert!(out.contains("Conversations (0):"));
        assert!(out.contains("nothing left to work"));
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(400_000), "6m 40s");
        assert_eq!(format_millis(59_999), "59s");
        assert_eq!(format_millis(3_900_000), "1h 5m");
        assert_eq!(format_millis(-5), "0s");
    }
}
