use crate::models::{Assignment, Conversation};
use crate::session::TimerFired;

#[derive(Debug, Clone)]
pub enum Action {
    // Conversation menu
    NextConversation,
    PrevConversation,
    OpenHighlighted,
    SelectConversation(String),

    // Contact pane
    AdvanceContact,       // Done with this contact, move to the next open one
    ReportCampaignClosed, // Contact view found the campaign closed mid-session

    // Texting-closed dialog
    AcknowledgeWarning,

    // Session timers
    TimerFired(TimerFired),

    // Data refresh (full snapshots)
    ConversationsRefreshed(Vec<Conversation>),
    AssignmentRefreshed(Option<Assignment>),
    RefreshFailed(String),
    RefreshNow,

    // App control
    Quit,
    Tick,
    Resize(u16, u16),
}

impl Action {
    /// Map a keybinding action name to an action.
    pub fn from_binding(name: &str) -> Option<Self> {
        let action = match name {
            "quit" => Action::Quit,
            "next_conversation" => Action::NextConversation,
            "prev_conversation" => Action::PrevConversation,
            "open_conversation" => Action::OpenHighlighted,
            "advance" => Action::AdvanceContact,
            "report_closed" => Action::ReportCampaignClosed,
            "refresh" => Action::RefreshNow,
            "acknowledge" => Action::AcknowledgeWarning,
            _ => return None,
        };
        Some(action)
    }
}
