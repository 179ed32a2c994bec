//! Ordered, skip-aware queue of an assignment's conversations.
//!
//! The queue holds a full snapshot of the conversation list (newest activity
//! first) plus the id of the conversation currently on screen. Closed
//! conversations stay in the list for review but are skipped when choosing
//! what to work on next.

use crate::models::{Assignment, Campaign, Conversation, MessageStatus};
use tracing::debug;

/// Sort by `updated_at` descending. Conversations without a timestamp go last.
/// `sort_by` is stable, so ties keep their input order.
pub fn sort_conversations(mut conversations: Vec<Conversation>) -> Vec<Conversation> {
    conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    conversations
}

/// The first conversation, in list order, that isn't closed.
pub fn first_eligible_id(conversations: &[Conversation]) -> Option<&str> {
    conversations
        .iter()
        .find(|c| c.is_eligible())
        .map(|c| c.id.as_str())
}

/// Compute the conversation to visit after `current_id`.
///
/// Scans circularly from the entry after the current one and returns the first
/// conversation that isn't closed. Returns `None` when the list has at most one
/// entry or the scan comes back around without finding one. If `current_id`
/// is no longer in the list, falls back to the first entry.
pub fn next_conversation_id(conversations: &[Conversation], current_id: Option<&str>) -> Option<String> {
    let len = conversations.len();
    if len <= 1 {
        return None;
    }

    let Some(current_idx) = current_id.and_then(|id| conversations.iter().position(|c| c.id == id))
    else {
        debug!(?current_id, "current conversation not in list, falling back to first");
        return Some(conversations[0].id.clone());
    };

    let mut idx = (current_idx + 1) % len;
    while idx != current_idx {
        if conversations[idx].is_eligible() {
            return Some(conversations[idx].id.clone());
        }
        idx = (idx + 1) % len;
    }

    None
}

#[derive(Debug, Clone, Default)]
pub struct ConversationQueue {
    conversations: Vec<Conversation>,
    current_id: Option<String>,
}

impl ConversationQueue {
    pub fn new(conversations: Vec<Conversation>) -> Self {
        let conversations = sort_conversations(conversations);
        let current_id = first_eligible_id(&conversations).map(str::to_string);
        Self {
            conversations,
            current_id,
        }
    }

    /// Replace the snapshot with a freshly fetched list.
    ///
    /// Only auto-selects when nothing is currently selected; an existing
    /// selection is kept even if it no longer appears in the new list.
    pub fn refresh(&mut self, conversations: Vec<Conversation>) {
        self.conversations = sort_conversations(conversations);

        if self.current_id.is_none() {
            self.current_id = first_eligible_id(&self.conversations).map(str::to_string);
            if let Some(id) = &self.current_id {
                debug!(%id, "selected first conversation after refresh");
            }
        }
    }

    /// Manual selection from the menu. Closed conversations may be opened for review.
    pub fn select(&mut self, id: impl Into<String>) {
        self.current_id = Some(id.into());
    }

    pub fn next_id(&self) -> Option<String> {
        next_conversation_id(&self.conversations, self.current_id.as_deref())
    }

    /// Move to the next conversation to work. `None` means the queue is done.
    pub fn advance(&mut self) -> Option<&str> {
        let next = self.next_id();
        debug!(from = ?self.current_id, to = ?next, "advancing conversation");
        self.current_id = next;
        self.current_id.as_deref()
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn current(&self) -> Option<&Conversation> {
        let id = self.current_id.as_deref()?;
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.current_id.is_none()
    }

    /// Contacts that haven't received their first message yet.
    ///
    /// Prefers the assignment's server-side tally when it has one, since the
    /// conversation list may be filtered.
    pub fn unsent_initial_count(&self, assignment: Option<&Assignment>) -> usize {
        if let Some(count) = assignment.and_then(|a| a.count_for(MessageStatus::NeedsMessage)) {
            return count;
        }
        self.conversations
            .iter()
            .filter(|c| c.message_status == MessageStatus::NeedsMessage)
            .count()
    }

    pub fn more_batches_available(&self, campaign: Option<&Campaign>) -> bool {
        self.current_id.is_some()
            && campaign.is_some_and(|c| c.use_dynamic_assignment && c.has_unassigned_contacts_for_texter)
    }
}
