use serde::{Deserialize, Serialize};

use super::conversation::MessageStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    #[default]
    Active,
    Closed,
    Archived,
    #[serde(other)]
    Other,
}

impl CampaignStatus {
    /// Campaigns in these states accept no more texting.
    pub fn is_closed(&self) -> bool {
        matches!(self, CampaignStatus::Closed | CampaignStatus::Archived)
    }
}

/// Allowed texting window, expressed in the campaign's fixed UTC offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextingHours {
    #[serde(default = "default_enforced")]
    pub enforced: bool,
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

fn default_enforced() -> bool {
    true
}

fn default_start_hour() -> u32 {
    9
}

fn default_end_hour() -> u32 {
    21
}

impl Default for TextingHours {
    fn default() -> Self {
        Self {
            enforced: default_enforced(),
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
            utc_offset_minutes: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub use_dynamic_assignment: bool,
    #[serde(default)]
    pub has_unassigned_contacts_for_texter: bool,
    #[serde(default)]
    pub organization_id: String,
    #[serde(default)]
    pub texting_hours: TextingHours,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Texter {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCount {
    pub message_status: MessageStatus,
    pub count: usize,
}

/// A texter's allocation of contacts within one campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    #[serde(default)]
    pub texter: Texter,
    /// Server-side tallies; `None` when the data source doesn't report them.
    #[serde(default)]
    pub contact_counts: Option<Vec<ContactCount>>,
    pub campaign: Campaign,
}

impl Assignment {
    pub fn count_for(&self, status: MessageStatus) -> Option<usize> {
        self.contact_counts
            .as_ref()?
            .iter()
            .find(|c| c.message_status == status)
            .map(|c| c.count)
    }
}
