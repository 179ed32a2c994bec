use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

/// Default keybindings embedded at compile time
const DEFAULT_KEYBINDINGS: &str = include_str!("defaults.toml");

/// A key combination (key code + modifiers)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Normalize a terminal key event. Shift is folded into the character
    /// for printable keys, so "J" arrives as `Char('J')` without modifiers.
    pub fn from_event(key: &KeyEvent) -> Self {
        let mut modifiers = key.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT);
        if matches!(key.code, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        Self::new(key.code, modifiers)
    }

    /// Parse a key string like "Ctrl-c", "Shift-Tab", "Enter"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s == "-" {
            return Some(Self::new(KeyCode::Char('-'), KeyModifiers::NONE));
        }

        let mut parts: Vec<&str> = s.split('-').collect();
        let key_str = parts.pop()?;

        let mut modifiers = KeyModifiers::NONE;
        for modifier in parts {
            match modifier.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" | "opt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        Some(Self::new(parse_key_code(key_str)?, modifiers))
    }

    /// Convert to display string for the status bar
    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        parts.push(key_code_display(&self.code));
        parts.join("-")
    }
}

fn parse_key_code(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "space" => Some(KeyCode::Char(' ')),
        f if f.starts_with('f') => f[1..].parse::<u8>().ok().filter(|n| (1..=12).contains(n)).map(KeyCode::F),
        _ => None,
    }
}

fn key_code_display(code: &KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "BackTab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    }
}

/// Which set of bindings applies right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// Working the conversation menu and contact pane.
    Menu,
    /// The texting-closed dialog is up.
    Dialog,
}

/// The action name as a string (see `Action::from_binding`)
pub type ActionName = String;

/// Raw TOML structure for keybindings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KeybindingsToml {
    #[serde(default)]
    pub global: HashMap<String, String>,
    #[serde(default)]
    pub menu: HashMap<String, String>,
    #[serde(default)]
    pub dialog: HashMap<String, String>,
}

/// Parsed keybinding configuration with KeyCombo lookups
#[derive(Debug, Clone)]
pub struct KeybindingConfig {
    /// Work in any mode; checked first
    pub global: HashMap<KeyCombo, ActionName>,
    pub menu: HashMap<KeyCombo, ActionName>,
    pub dialog: HashMap<KeyCombo, ActionName>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self::from_toml(DEFAULT_KEYBINDINGS).unwrap_or_else(|| Self::from_raw(&KeybindingsToml::default()))
    }
}

impl KeybindingConfig {
    fn parse_bindings(raw: &HashMap<String, String>) -> HashMap<KeyCombo, ActionName> {
        raw.iter()
            .filter_map(|(key, action)| {
                let combo = KeyCombo::parse(key);
                if combo.is_none() {
                    warn!(%key, "ignoring unparseable key binding");
                }
                combo.map(|combo| (combo, action.clone()))
            })
            .collect()
    }

    fn from_raw(raw: &KeybindingsToml) -> Self {
        Self {
            global: Self::parse_bindings(&raw.global),
            menu: Self::parse_bindings(&raw.menu),
            dialog: Self::parse_bindings(&raw.dialog),
        }
    }

    pub fn from_toml(contents: &str) -> Option<Self> {
        match toml::from_str::<KeybindingsToml>(contents) {
            Ok(raw) => Some(Self::from_raw(&raw)),
            Err(e) => {
                warn!(error = %e, "invalid keybindings file");
                None
            }
        }
    }

    pub fn lookup(&self, mode: KeyMode, combo: &KeyCombo) -> Option<&str> {
        if let Some(action) = self.global.get(combo) {
            return Some(action.as_str());
        }
        let bindings = match mode {
            KeyMode::Menu => &self.menu,
            KeyMode::Dialog => &self.dialog,
        };
        bindings.get(combo).map(String::as_str)
    }

    /// First key bound to `action` in `mode`, for hints in the UI.
    pub fn key_for(&self, mode: KeyMode, action: &str) -> Option<String> {
        let bindings = match mode {
            KeyMode::Menu => &self.menu,
            KeyMode::Dialog => &self.dialog,
        };
        let mut keys: Vec<String> = bindings
            .iter()
            .chain(self.global.iter())
            .filter(|(_, name)| name.as_str() == action)
            .map(|(combo, _)| combo.display())
            .collect();
        keys.sort_by_key(|k| (k.len(), k.clone()));
        keys.into_iter().next()
    }
}

/// Load keybindings from user config, writing the defaults there on first run
pub fn load_keybindings() -> KeybindingConfig {
    let user_config_path = get_user_config_path();

    if !user_config_path.exists() {
        if let Some(parent) = user_config_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(&user_config_path, DEFAULT_KEYBINDINGS) {
            warn!(path = %user_config_path.display(), error = %e, "could not write default keybindings");
        }
        return KeybindingConfig::default();
    }

    std::fs::read_to_string(&user_config_path)
        .ok()
        .and_then(|contents| KeybindingConfig::from_toml(&contents))
        .unwrap_or_default()
}

/// Get the path to user's keybindings config file
pub fn get_user_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("texter")
        .join("keybindings.toml")
}
