use crate::app::{Action, AppState};
use crate::config::KeyCombo;
use crate::session::TimerFired;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

/// Internal event type for terminal events
enum TerminalEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

pub struct EventHandler {
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    timer_tx: mpsc::UnboundedSender<TimerFired>,
    timer_rx: mpsc::UnboundedReceiver<TimerFired>,
    terminal_rx: mpsc::UnboundedReceiver<TerminalEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        let (terminal_tx, terminal_rx) = mpsc::unbounded_channel();

        // Spawn dedicated thread for terminal events
        std::thread::spawn(move || {
            let poll_timeout = Duration::from_millis(250);
            loop {
                let event = if event::poll(poll_timeout).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => TerminalEvent::Key(key),
                        Ok(Event::Resize(w, h)) => TerminalEvent::Resize(w, h),
                        _ => TerminalEvent::Tick,
                    }
                } else {
                    TerminalEvent::Tick
                };

                if terminal_tx.send(event).is_err() {
                    break; // Channel closed, exit thread
                }
            }
        });

        Self {
            action_tx,
            action_rx,
            timer_tx,
            timer_rx,
            terminal_rx,
        }
    }

    /// For background pollers
    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    /// For the session's timer set
    pub fn timer_sender(&self) -> mpsc::UnboundedSender<TimerFired> {
        self.timer_tx.clone()
    }

    pub async fn next(&mut self, state: &AppState) -> Result<Action> {
        // Keyboard input is never queued behind background work.
        if let Ok(event) = self.terminal_rx.try_recv() {
            return Ok(Self::terminal_action(event, state));
        }

        tokio::select! {
            biased;

            Some(event) = self.terminal_rx.recv() => Ok(Self::terminal_action(event, state)),
            Some(fired) = self.timer_rx.recv() => Ok(Action::TimerFired(fired)),
            Some(action) = self.action_rx.recv() => Ok(action),
            else => Ok(Action::Tick)
        }
    }

    fn terminal_action(event: TerminalEvent, state: &AppState) -> Action {
        match event {
            TerminalEvent::Key(key) => handle_key_event(key, state),
            TerminalEvent::Resize(w, h) => Action::Resize(w, h),
            TerminalEvent::Tick => Action::Tick,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a key press through the bindings for the current mode.
pub fn handle_key_event(key: KeyEvent, state: &AppState) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::Tick;
    }

    let combo = KeyCombo::from_event(&key);
    state
        .ui
        .keybindings
        .lookup(state.key_mode(), &combo)
        .and_then(Action::from_binding)
        .unwrap_or(Action::Tick)
}
