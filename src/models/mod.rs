mod assignment;
mod conversation;

pub use assignment::{Assignment, Campaign, CampaignStatus, ContactCount, Texter, TextingHours};
pub use conversation::{Conversation, MessageStatus};
