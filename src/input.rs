//! Keyboard mapping for menu navigation
//!
//! Raw crossterm key events are classified into [`MenuInput`]s through a small
//! binding table. The same table produces the key hint shown in the status bar.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::navigation::MenuInput;

/// A single key binding
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub input: MenuInput,
    pub display: &'static str,
}

impl Keybinding {
    pub fn new(key: KeyCode, input: MenuInput, display: &'static str) -> Self {
        Self {
            key,
            input,
            display,
        }
    }
}

/// Binding table; unbound keys classify as [`MenuInput::Other`]
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<Keybinding>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

impl Keymap {
    /// Arrow keys move, Enter and Tab confirm
    pub fn new() -> Self {
        Self {
            bindings: vec![
                Keybinding::new(KeyCode::Up, MenuInput::MoveUp, "Up"),
                Keybinding::new(KeyCode::Down, MenuInput::MoveDown, "Down"),
                Keybinding::new(KeyCode::Enter, MenuInput::Confirm, "ENTER"),
                Keybinding::new(KeyCode::Tab, MenuInput::Confirm, "TAB"),
            ],
        }
    }

    /// Classify a key code
    pub fn lookup(&self, key: KeyCode) -> MenuInput {
        self.bindings
            .iter()
            .find(|b| b.key == key)
            .map(|b| b.input)
            .unwrap_or(MenuInput::Other)
    }

    /// Classify a key event; `None` for release/repeat events
    pub fn classify(&self, event: KeyEvent) -> Option<MenuInput> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        Some(self.lookup(event.code))
    }

    /// Ctrl+C; raw mode delivers it as a key press instead of SIGINT
    pub fn is_interrupt(&self, event: &KeyEvent) -> bool {
        event.kind == KeyEventKind::Press
            && event.code == KeyCode::Char('c')
            && event.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Status-bar hint naming the confirm keys, e.g. `... [TAB] or [ENTER] to select menu items`
    pub fn hint(&self) -> String {
        let confirm: Vec<String> = self
            .bindings
            .iter()
            .rev()
            .filter(|b| b.input == MenuInput::Confirm)
            .map(|b| format!("[{}]", b.display))
            .collect();
        format!(
            "Use the arrow keys to navigate and {} to select menu items",
            confirm.join(" or ")
        )
    }
}
