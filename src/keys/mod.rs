pub mod parser;
pub mod preset;

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::{Result, TodoError};
use preset::{get_preset, Action};

pub struct KeybindingMap {
    bindings: HashMap<KeyEvent, Action>,
}

impl KeybindingMap {
    pub fn from_preset(name: &str, overrides: &HashMap<String, String>) -> Result<Self> {
        let mut bindings = get_preset(name)
            .ok_or_else(|| TodoError::Config(format!("Unknown keybinding preset: {}", name)))?;

        for (action_name, key_str) in overrides {
            let action = Action::from_name(action_name)
                .ok_or_else(|| TodoError::Config(format!("Unknown action: {}", action_name)))?;
            let key_event = parser::parse_key(key_str)?;

            bindings.retain(|_, bound| *bound != action);
            bindings.insert(key_event, action);
        }

        Ok(Self { bindings })
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// First key bound to `action`, formatted for display.
    pub fn key_for(&self, action: Action) -> Option<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| format_key_event(k))
            .collect();
        // HashMap order is arbitrary; prefer the shortest label
        keys.sort_by_key(|k| (k.chars().count(), k.clone()));
        keys.into_iter().next()
    }

    pub fn hints(&self) -> Vec<(String, &'static str)> {
        [
            Action::NewTodo,
            Action::ToggleDone,
            Action::Search,
            Action::SwitchFocus,
            Action::Help,
            Action::Quit,
        ]
        .into_iter()
        .filter_map(|action| self.key_for(action).map(|k| (k, action.hint_text())))
        .collect()
    }

    /// Every action with its key, in declaration order, for the help popup.
    pub fn help_lines(&self) -> Vec<(String, &'static str)> {
        Action::ALL
            .into_iter()
            .map(|action| {
                let key = self.key_for(action).unwrap_or_else(|| "-".into());
                (key, action.hint_text())
            })
            .collect()
    }
}

fn format_key_event(key: &KeyEvent) -> String {
    let mut parts = Vec::new();

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".to_string());
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt".to_string());
    }
    // uppercase letters already imply shift
    let shifted_letter = matches!(key.code, KeyCode::Char(c) if c.is_ascii_uppercase());
    if key.modifiers.contains(KeyModifiers::SHIFT) && !shifted_letter {
        parts.push("Shift".to_string());
    }

    parts.push(match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "BackTab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    });

    parts.join("+")
}
