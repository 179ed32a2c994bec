use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::app::Action;
use crate::config::PollConfig;
use crate::error::SourceError;
use crate::source::{AssignmentSource, ConversationSource};

/// Wakes every poller for an immediate fetch.
#[derive(Clone, Default)]
pub struct RefreshTrigger {
    notify: Arc<Notify>,
}

impl RefreshTrigger {
    pub fn trigger(&self) {
        self.notify.notify_waiters();
    }
}

/// Background refresh of conversations and the assignment. Each tick sends
/// a complete snapshot to the action channel; tasks stop when dropped.
pub struct Pollers {
    handles: Vec<JoinHandle<()>>,
}

impl Pollers {
    pub fn spawn(
        conversations: Arc<dyn ConversationSource>,
        assignments: Arc<dyn AssignmentSource>,
        poll: &PollConfig,
        trigger: RefreshTrigger,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        let conversations_task = spawn_poll(
            "conversations",
            poll.conversations_interval(),
            trigger.clone(),
            action_tx.clone(),
            move || conversations.fetch_conversations().map(Action::ConversationsRefreshed),
        );
        let assignment_task = spawn_poll(
            "assignment",
            poll.assignment_interval(),
            trigger,
            action_tx,
            move || assignments.fetch_assignment().map(Action::AssignmentRefreshed),
        );

        Self {
            handles: vec![conversations_task, assignment_task],
        }
    }
}

impl Drop for Pollers {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

fn spawn_poll<F>(
    label: &'static str,
    every: Duration,
    trigger: RefreshTrigger,
    action_tx: mpsc::UnboundedSender<Action>,
    fetch: F,
) -> JoinHandle<()>
where
    F: Fn() -> Result<Action, SourceError> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The runtime does the initial load itself.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = trigger.notify.notified() => {
                    debug!(label, "manual refresh");
                }
            }

            let action = match fetch() {
                Ok(action) => action,
                Err(e) => {
                    warn!(label, error = %e, "refresh failed, keeping previous snapshot");
                    Action::RefreshFailed(e.to_string())
                }
            };
            if action_tx.send(action).is_err() {
                break;
            }
        }
    })
}
