mod data;
mod system;
mod ui;

pub use data::DataState;
pub use system::SystemState;
pub use ui::UIState;

use tokio::sync::mpsc;

use crate::config::{KeyMode, KeybindingConfig};
use crate::models::{Campaign, Conversation};
use crate::session::{SessionStatus, TextingSession, TimerFired, WarningReason};

pub struct AppState {
    pub data: DataState,
    pub session: TextingSession,
    pub system: SystemState,
    pub ui: UIState,
}

impl AppState {
    pub fn new(
        timer_tx: mpsc::UnboundedSender<TimerFired>,
        organization_id: Option<String>,
        keybindings: KeybindingConfig,
    ) -> Self {
        Self {
            data: DataState::new(),
            session: TextingSession::new(timer_tx, organization_id),
            system: SystemState::new(),
            ui: UIState::new(keybindings),
        }
    }

    pub fn campaign(&self) -> Option<&Campaign> {
        self.data.assignment.as_ref().map(|a| &a.campaign)
    }

    pub fn session_status(&self) -> Option<SessionStatus> {
        self.session.status()
    }

    pub fn warning(&self) -> Option<WarningReason> {
        self.session.warning()
    }

    pub fn dialog_open(&self) -> bool {
        self.session.dialog_open()
    }

    pub fn key_mode(&self) -> KeyMode {
        if self.dialog_open() {
            KeyMode::Dialog
        } else {
            KeyMode::Menu
        }
    }

    /// Menu contents, newest activity first
    pub fn conversations(&self) -> &[Conversation] {
        self.data.queue.conversations()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.data.queue.current_id()
    }

    pub fn selected_conversation(&self) -> Option<&Conversation> {
        self.data.queue.current()
    }

    pub fn highlighted_conversation(&self) -> Option<&Conversation> {
        self.conversations().get(self.ui.menu_cursor)
    }

    pub fn unsent_initial_count(&self) -> usize {
        self.data.queue.unsent_initial_count(self.data.assignment.as_ref())
    }

    pub fn more_batches_available(&self) -> bool {
        self.data.queue.more_batches_available(self.campaign())
    }

    /// Keep the menu highlight on the selected conversation, or inside the
    /// list when the selection isn't in it.
    pub fn sync_menu_cursor(&mut self) {
        let conversations = self.data.queue.conversations();
        if let Some(idx) = self
            .data
            .queue
            .current_id()
            .and_then(|id| conversations.iter().position(|c| c.id == id))
        {
            self.ui.menu_cursor = idx;
        } else {
            self.ui.menu_cursor = self.ui.menu_cursor.min(conversations.len().saturating_sub(1));
        }
    }

    pub fn tick_animation(&mut self) {
        self.system.animation_frame = self.system.animation_frame.wrapping_add(1);
    }
}
