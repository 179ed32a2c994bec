use crate::app::{Action, AppState};
use crate::session::{HoursPolicy, WarningReason};
use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info};

use super::poller::RefreshTrigger;

pub fn process_action(
    state: &mut AppState,
    action: Action,
    policy: &dyn HoursPolicy,
    refresh: &RefreshTrigger,
) -> Result<()> {
    match action {
        Action::Quit => {
            state.session.dispose();
            state.system.should_quit = true;
        }
        Action::Tick => {
            state.tick_animation();
        }
        Action::Resize(w, h) => {
            state.system.terminal_size = (w, h);
        }

        // Conversation menu
        Action::NextConversation => {
            let len = state.conversations().len();
            if len > 0 {
                state.ui.menu_cursor = (state.ui.menu_cursor + 1).min(len - 1);
            }
        }
        Action::PrevConversation => {
            state.ui.menu_cursor = state.ui.menu_cursor.saturating_sub(1);
        }
        Action::OpenHighlighted => {
            if let Some(id) = state.highlighted_conversation().map(|c| c.id.clone()) {
                return process_action(state, Action::SelectConversation(id), policy, refresh);
            }
        }
        Action::SelectConversation(id) => {
            debug!(%id, "conversation selected from menu");
            state.data.queue.select(id);
            state.sync_menu_cursor();
        }

        // Contact pane
        Action::AdvanceContact => {
            if state.selected_id().is_none() || state.dialog_open() {
                return Ok(());
            }
            match state.data.queue.advance() {
                Some(id) => debug!(%id, "advanced to next conversation"),
                None => info!("no conversations left to work"),
            }
            state.sync_menu_cursor();
        }
        Action::ReportCampaignClosed => {
            state.session.show_closed(WarningReason::CampaignClosed, &mut state.system);
        }

        // Texting-closed dialog
        Action::AcknowledgeWarning => {
            let campaign = state.data.assignment.as_ref().map(|a| &a.campaign);
            state.session.acknowledge(campaign, policy, &mut state.system);
        }

        Action::TimerFired(fired) => {
            state.session.on_timer(fired, &mut state.system);
        }

        // Data refresh
        Action::ConversationsRefreshed(conversations) => {
            debug!(count = conversations.len(), "conversations refreshed");
            state.data.queue.refresh(conversations);
            state.data.conversations_refreshed_at = Some(Utc::now());
            state.ui.refresh_error = None;
            state.sync_menu_cursor();
        }
        Action::AssignmentRefreshed(assignment) => {
            debug!(present = assignment.is_some(), "assignment refreshed");
            state.data.assignment = assignment;
            state.data.assignment_refreshed_at = Some(Utc::now());
            state.ui.refresh_error = None;
            // Starts a deferred session; no-op once started.
            state
                .session
                .start(state.data.assignment.as_ref(), policy, &mut state.system);
        }
        Action::RefreshFailed(message) => {
            state.ui.refresh_error = Some(message);
        }
        Action::RefreshNow => {
            refresh.trigger();
        }
    }

    Ok(())
}
