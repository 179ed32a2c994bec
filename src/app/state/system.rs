use crate::navigation::{Navigator, Route};

pub struct SystemState {
    /// Terminal size
    pub terminal_size: (u16, u16),
    /// Animation frame counter (for the refresh spinner)
    pub animation_frame: usize,
    /// Should quit flag
    pub should_quit: bool,
    /// Where the session sent the texter, reported on exit
    pub exit_route: Option<Route>,
}

impl SystemState {
    pub fn new() -> Self {
        Self {
            terminal_size: (80, 24),
            animation_frame: 0,
            should_quit: false,
            exit_route: None,
        }
    }
}

impl Default for SystemState {
    fn default() -> Self {
        Self::new()
    }
}

/// Leaving the session means leaving the TUI.
impl Navigator for SystemState {
    fn navigate(&mut self, route: Route) {
        self.exit_route = Some(route);
        self.should_quit = true;
    }
}
