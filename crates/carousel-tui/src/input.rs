use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollLeft,
    ScrollRight,
    PageLeft,
    PageRight,
    JumpToFirst,
    JumpToLast,
    PendingG, // First 'g' press, waiting for second 'g'
    Select,
    /// Click at a column of the carousel area
    ActivateAt(u16),
    ToggleLoop,
    ScaleUp,
    ScaleDown,
    ReloadConfig,
    ToggleHelp,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if app.mode == Mode::Help {
        // Any key closes help
        return Action::ExitMode;
    }

    let binding = KeyBinding::new(key.code, key.modifiers);

    if keymap.is_g_prefix(&binding) {
        if app.pending_key == Some('g') {
            return keymap.get_pending_g_action().copied().unwrap_or(Action::None);
        }
        return Action::PendingG;
    }

    if let Some(action) = keymap.get(&binding) {
        return *action;
    }

    // Punctuation such as '+' or '?' arrives with SHIFT on some terminals
    if let KeyCode::Char(c) = key.code {
        if !c.is_ascii_alphabetic() && key.modifiers.contains(KeyModifiers::SHIFT) {
            let plain = KeyBinding::new(key.code, key.modifiers.difference(KeyModifiers::SHIFT));
            if let Some(action) = keymap.get(&plain) {
                return *action;
            }
        }
    }

    Action::None
}

/// Handle a mouse event in the carousel area starting at column `area_x`
pub fn handle_mouse_event(mouse: MouseEvent, area_x: u16) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => Action::ScrollRight,
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => Action::ScrollLeft,
        MouseEventKind::Down(MouseButton::Left) => {
            Action::ActivateAt(mouse.column.saturating_sub(area_x))
        }
        _ => Action::None,
    }
}
