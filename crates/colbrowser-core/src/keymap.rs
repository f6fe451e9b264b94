//! Keyboard shortcuts.

/// A key press reduced to what the shortcut table needs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyInput {
    /// `KeyboardEvent.key` value, e.g. `"c"`, `"Delete"`, `"F2"`
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Copy,
    Cut,
    Paste,
    Delete,
    Rename,
    SelectAll,
    ClearSelection,
    Open,
}

/// Map a key press to an action, or `None` if it is not a shortcut.
pub fn action_for(input: &KeyInput) -> Option<KeyAction> {
    if input.command() {
        return match input.key.to_ascii_lowercase().as_str() {
            "c" => Some(KeyAction::Copy),
            "x" => Some(KeyAction::Cut),
            "v" => Some(KeyAction::Paste),
            "a" => Some(KeyAction::SelectAll),
            _ => None,
        };
    }
    match input.key.as_str() {
        "Delete" => Some(KeyAction::Delete),
        "F2" => Some(KeyAction::Rename),
        "Escape" => Some(KeyAction::ClearSelection),
        "Enter" => Some(KeyAction::Open),
        _ => None,
    }
}

/// Shortcuts apply while the widget has focus or something is selected.
pub fn shortcuts_active(has_focus: bool, selection_len: usize) -> bool {
    has_focus || selection_len > 0
}
