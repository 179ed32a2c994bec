use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a contact's message thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageStatus {
    NeedsMessage,
    NeedsResponse,
    Convo,
    Messaged,
    Closed,
}

impl MessageStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MessageStatus::NeedsMessage => "Needs message",
            MessageStatus::NeedsResponse => "Needs response",
            MessageStatus::Convo => "Conversation",
            MessageStatus::Messaged => "Messaged",
            MessageStatus::Closed => "Closed",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            MessageStatus::NeedsMessage => "NEW",
            MessageStatus::NeedsResponse => "REPLY",
            MessageStatus::Convo => "CONVO",
            MessageStatus::Messaged => "SENT",
            MessageStatus::Closed => "DONE",
        }
    }
}

/// One contact's thread within an assignment. Owned by the data source;
/// the texter only ever changes which conversation is current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub message_status: MessageStatus,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Conversation {
    pub fn new(id: impl Into<String>, message_status: MessageStatus) -> Self {
        Self {
            id: id.into(),
            message_status,
            first_name: String::new(),
            last_name: String::new(),
            updated_at: None,
        }
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Closed conversations are skipped when picking what to work on next.
    pub fn is_eligible(&self) -> bool {
        self.message_status != MessageStatus::Closed
    }

    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            format!("Contact {}", self.id)
        } else {
            name.to_string()
        }
    }
}
