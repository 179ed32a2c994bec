use crate::config::KeybindingConfig;

pub struct UIState {
    /// Highlighted row in the conversation menu
    pub menu_cursor: usize,
    pub keybindings: KeybindingConfig,
    /// Last refresh problem, shown in the status bar until the next good refresh
    pub refresh_error: Option<String>,
}

impl UIState {
    pub fn new(keybindings: KeybindingConfig) -> Self {
        Self {
            menu_cursor: 0,
            keybindings,
            refresh_error: None,
        }
    }
}

impl Default for UIState {
    fn default() -> Self {
        Self::new(KeybindingConfig::default())
    }
}
