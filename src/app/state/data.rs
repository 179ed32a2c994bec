use chrono::{DateTime, Utc};

use crate::models::Assignment;
use crate::queue::ConversationQueue;

pub struct DataState {
    /// Latest assignment snapshot; `None` until the source delivers one
    pub assignment: Option<Assignment>,
    pub queue: ConversationQueue,
    pub conversations_refreshed_at: Option<DateTime<Utc>>,
    pub assignment_refreshed_at: Option<DateTime<Utc>>,
}

impl DataState {
    pub fn new() -> Self {
        Self {
            assignment: None,
            queue: ConversationQueue::default(),
            conversations_refreshed_at: None,
            assignment_refreshed_at: None,
        }
    }
}

impl Default for DataState {
    fn default() -> Self {
        Self::new()
    }
}
