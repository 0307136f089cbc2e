/// Input Router Module
///
/// Keyboard shortcuts are registered with a [`ShortcutRegistry`] and resolved
/// against incoming key events before any text editing happens. Registration
/// hands back a [`ShortcutId`] so a shortcut can be removed again when the
/// bindings are reloaded.
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::{Result, SheetError};

/// Things a shortcut can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FocusSearch,
    ToggleTheme,
    Quit,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    /// Jump to the category at this index of the full dataset.
    JumpTo(usize),
}

/// When a shortcut is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// In every focus state, including while typing in the search field.
    Global,
    /// Only while the search field is not focused.
    Sheet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// A plain key. Shift is tolerated since it is part of producing many
    /// printable characters.
    pub fn unmodified(code: KeyCode) -> Self {
        KeyBinding {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Self {
        KeyBinding { code, modifiers }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        if key.code != self.code {
            return false;
        }
        let held = key.modifiers - KeyModifiers::SHIFT;
        held == self.modifiers - KeyModifiers::SHIFT
    }
}

/// Parses binding strings such as `"/"`, `"t"`, `"esc"`, `"f5"` or
/// `"ctrl+c"`.
pub fn parse_key(spec: &str) -> Result<KeyBinding> {
    let mut modifiers = KeyModifiers::NONE;
    let mut parts: Vec<&str> = spec.split('+').collect();
    // "+" itself, or a binding like "ctrl++"
    if spec.ends_with("++") || spec == "+" {
        parts.truncate(parts.len().saturating_sub(2));
        parts.push("+");
    }
    let key = parts
        .pop()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| SheetError::Key(spec.to_string()))?;

    for modifier in parts {
        modifiers |= match modifier.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            "super" | "cmd" => KeyModifiers::SUPER,
            _ => return Err(SheetError::Key(spec.to_string())),
        };
    }

    let mut chars = key.chars();
    let code = match (chars.next(), chars.next()) {
        (Some(c), None) => KeyCode::Char(c),
        _ => match key.to_ascii_lowercase().as_str() {
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "enter" | "return" => KeyCode::Enter,
            "space" => KeyCode::Char(' '),
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            other => match other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                Some(n) if (1..=12).contains(&n) => KeyCode::F(n),
                _ => return Err(SheetError::Key(spec.to_string())),
            },
        },
    };
    Ok(KeyBinding::with_modifiers(code, modifiers))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShortcutId(u64);

#[derive(Debug, Clone)]
struct Shortcut {
    id: ShortcutId,
    binding: KeyBinding,
    action: Action,
    scope: Scope,
}

#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    next_id: u64,
    shortcuts: Vec<Shortcut>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, binding: KeyBinding, action: Action, scope: Scope) -> ShortcutId {
        let id = ShortcutId(self.next_id);
        self.next_id += 1;
        self.shortcuts.push(Shortcut {
            id,
            binding,
            action,
            scope,
        });
        id
    }

    /// Removes a shortcut. Returns `false` if it was not registered.
    pub fn unregister(&mut self, id: ShortcutId) -> bool {
        let before = self.shortcuts.len();
        self.shortcuts.retain(|s| s.id != id);
        self.shortcuts.len() != before
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }

    /// Finds the action for a key. The first registered match wins.
    pub fn resolve(&self, key: &KeyEvent, search_focused: bool) -> Option<Action> {
        self.shortcuts
            .iter()
            .filter(|s| s.scope == Scope::Global || !search_focused)
            .find(|s| s.binding.matches(key))
            .map(|s| s.action)
    }
}
