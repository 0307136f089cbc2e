// Search Controller for gitsheet
//
// Owns the text typed into the search field, the cursor inside it and whether
// the field has focus. Every edit recomputes the normalized query that the
// filter engine consumes; there is no debouncing.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::dataset::WHITESPACE;

/// Collapses every whitespace run to a single space and strips leading
/// whitespace. Trailing whitespace is kept so the cursor does not jump while
/// the user is still typing.
pub fn normalize(raw: &str) -> String {
    WHITESPACE.replace_all(raw, " ").trim_start().to_string()
}

#[derive(Debug, Default)]
pub struct SearchController {
    input: String,
    /// Cursor position counted in chars.
    cursor: usize,
    focused: bool,
    query: String,
}

impl SearchController {
    pub fn new() -> Self {
        SearchController::default()
    }

    /// The text exactly as typed.
    pub fn raw(&self) -> &str {
        &self.input
    }

    /// The normalized query handed to the filter engine.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Moves focus to the search field without touching its content.
    pub fn request_focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Replaces the whole input and puts the cursor at the end.
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.cursor = self.input.chars().count();
        self.refresh();
    }

    pub fn clear(&mut self) {
        self.set_input("");
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.input.insert(at, c);
        self.cursor += 1;
        self.refresh();
    }

    /// Removes the char before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.input.remove(at);
        self.cursor -= 1;
        self.refresh();
    }

    /// Removes the char under the cursor.
    pub fn delete(&mut self) {
        if self.cursor >= self.input.chars().count() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.input.remove(at);
        self.refresh();
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input.chars().count());
    }

    /// Applies an editing key to the field. Returns `true` when the key was
    /// consumed. Shortcut interception happens before this is called.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => return false,
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.input.chars().count(),
            KeyCode::Esc | KeyCode::Enter => self.blur(),
            _ => return false,
        }
        true
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn refresh(&mut self) {
        self.query = normalize(&self.input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  git   add  "), "git add ");
        assert_eq!(normalize("\tgit\n\nstash"), "git stash");
        assert_eq!(normalize("    "), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_typing_updates_query() {
        let mut search = SearchController::new();
        for c in "  git   add  ".chars() {
            search.insert_char(c);
        }
        assert_eq!(search.raw(), "  git   add  ");
        assert_eq!(search.query(), "git add ");
    }

    #[test]
    fn test_focus_keeps_content() {
        let mut search = SearchController::new();
        search.set_input("rebase");
        assert!(!search.is_focused());
        search.request_focus();
        assert!(search.is_focused());
        assert_eq!(search.raw(), "rebase");
        assert_eq!(search.cursor(), 6);
    }

    #[test]
    fn test_cursor_editing() {
        let mut search = SearchController::new();
        search.set_input("gt");
        search.move_left();
        search.insert_char('i');
        assert_eq!(search.raw(), "git");
        search.handle_key(key(KeyCode::Home));
        search.delete();
        assert_eq!(search.raw(), "it");
        search.handle_key(key(KeyCode::End));
        search.backspace();
        assert_eq!(search.raw(), "i");
        assert_eq!(search.query(), "i");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut search = SearchController::new();
        search.backspace();
        search.delete();
        assert_eq!(search.raw(), "");
        assert_eq!(search.cursor(), 0);
    }

    #[test]
    fn test_multibyte_input() {
        let mut search = SearchController::new();
        search.set_input("añb");
        search.move_left();
        search.backspace();
        assert_eq!(search.raw(), "ab");
    }

    #[test]
    fn test_handle_key() {
        let mut search = SearchController::new();
        search.request_focus();
        assert!(search.handle_key(key(KeyCode::Char('x'))));
        assert!(search.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert_eq!(search.raw(), "");
        assert!(!search.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)));
        assert!(!search.handle_key(key(KeyCode::F(2))));
        assert!(search.handle_key(key(KeyCode::Esc)));
        assert!(!search.is_focused());
    }
}
