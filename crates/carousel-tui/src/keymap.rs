use std::collections::HashMap;

use carousel_core::config::KeymapConfig;
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::warn;

use crate::input::Action;

/// Named keys accepted inside `<...>`
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("cr", KeyCode::Enter),
    ("enter", KeyCode::Enter),
    ("esc", KeyCode::Esc),
    ("space", KeyCode::Char(' ')),
    ("tab", KeyCode::Tab),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
];

/// Key code plus modifiers, as crossterm reports them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }
}

/// Key-to-action lookup built from [`KeymapConfig`]
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    /// Action bound to the two-key "gg" sequence
    gg_action: Option<Action>,
    /// Configured notation per action, for the help popup
    labels: Vec<(Action, String)>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let configured = [
            (&config.quit, Action::Quit),
            (&config.scroll_left, Action::ScrollLeft),
            (&config.scroll_right, Action::ScrollRight),
            (&config.page_left, Action::PageLeft),
            (&config.page_right, Action::PageRight),
            (&config.jump_to_first, Action::JumpToFirst),
            (&config.jump_to_last, Action::JumpToLast),
            (&config.select, Action::Select),
            (&config.toggle_loop, Action::ToggleLoop),
            (&config.scale_up, Action::ScaleUp),
            (&config.scale_down, Action::ScaleDown),
            (&config.reload_config, Action::ReloadConfig),
            (&config.help, Action::ToggleHelp),
        ];

        let mut keymap = Self {
            bindings: HashMap::new(),
            gg_action: None,
            labels: Vec::with_capacity(configured.len()),
        };
        for (notation, action) in configured {
            keymap.bind(notation, action);
        }

        // Fixed alternatives; Ctrl-C and Esc cannot be rebound
        keymap
            .bindings
            .insert(KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit);
        keymap.bindings.insert(KeyBinding::plain(KeyCode::Esc), Action::ExitMode);
        for (code, action) in [
            (KeyCode::Left, Action::ScrollLeft),
            (KeyCode::Right, Action::ScrollRight),
            (KeyCode::Home, Action::JumpToFirst),
            (KeyCode::End, Action::JumpToLast),
        ] {
            keymap.bindings.entry(KeyBinding::plain(code)).or_insert(action);
        }
        keymap
    }

    fn bind(&mut self, notation: &str, action: Action) {
        self.labels.push((action, notation.to_string()));
        if notation == "gg" {
            self.gg_action = Some(action);
            return;
        }
        let Some(binding) = parse_key_binding(notation) else {
            warn!("Invalid key binding '{}' for {:?}, ignoring", notation, action);
            return;
        };
        match self.bindings.get(&binding) {
            Some(existing) => warn!(
                "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                notation, existing, action
            ),
            None => {
                self.bindings.insert(binding, action);
            }
        }
    }

    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// Action for a completed "gg" sequence
    pub fn get_pending_g_action(&self) -> Option<&Action> {
        self.gg_action.as_ref()
    }

    /// Whether a bare 'g' starts the "gg" sequence
    pub fn is_g_prefix(&self, binding: &KeyBinding) -> bool {
        self.gg_action.is_some() && *binding == KeyBinding::plain(KeyCode::Char('g'))
    }

    /// Configured key notation for `action`
    pub fn label(&self, action: Action) -> Option<&str> {
        self.labels
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, key)| key.as_str())
    }
}

/// Parse Vim-style notation: a single character ("l", "+", "G" for
/// Shift+g), a Ctrl chord ("<C-d>") or a named key ("<CR>", "<Esc>").
pub fn parse_key_binding(notation: &str) -> Option<KeyBinding> {
    let notation = notation.trim();
    if let Some(inner) = notation
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .filter(|inner| !inner.is_empty())
    {
        if let Some(key) = inner.strip_prefix("C-").or_else(|| inner.strip_prefix("c-")) {
            let c = single_char(key)?;
            return Some(KeyBinding::new(
                KeyCode::Char(c.to_ascii_lowercase()),
                KeyModifiers::CONTROL,
            ));
        }
        let name = inner.to_ascii_lowercase();
        return NAMED_KEYS
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, code)| KeyBinding::plain(*code));
    }

    let c = single_char(notation)?;
    let modifiers = if c.is_ascii_uppercase() {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    Some(KeyBinding::new(KeyCode::Char(c), modifiers))
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
