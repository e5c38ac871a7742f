//! Text input component.
//!
//! A single-line text input with cursor movement and a placeholder. The
//! tag input embeds one of these for typing new tags and search terms.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// A single-line text input.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// The current input value.
    value: String,
    /// Cursor position within the value, in characters.
    cursor: usize,
    /// Placeholder text shown when empty.
    placeholder: String,
}

impl TextInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new input with the given placeholder.
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            ..Self::default()
        }
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value and move the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get the cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Insert text at the cursor, as from a paste.
    ///
    /// Line breaks are dropped; a tag name is a single line.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(c);
        }
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value was modified.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            // Character input
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert_char(c);
                true
            }
            // Backspace - delete character before cursor
            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.remove_char(self.cursor);
                    true
                } else {
                    false
                }
            }
            // Delete - delete character at cursor
            (KeyCode::Delete, _) => {
                if self.cursor < self.value.chars().count() {
                    self.remove_char(self.cursor);
                    true
                } else {
                    false
                }
            }
            // Left arrow - move cursor left
            (KeyCode::Left, KeyModifiers::NONE) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                false
            }
            // Right arrow - move cursor right
            (KeyCode::Right, KeyModifiers::NONE) => {
                if self.cursor < self.value.chars().count() {
                    self.cursor += 1;
                }
                false
            }
            // Home - move to beginning
            (KeyCode::Home, _) => {
                self.cursor = 0;
                false
            }
            // End - move to end
            (KeyCode::End, _) => {
                self.cursor = self.value.chars().count();
                false
            }
            // Ctrl+U - clear line
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if !self.value.is_empty() {
                    self.clear();
                    true
                } else {
                    false
                }
            }
            // Ctrl+W - delete word before cursor
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                if self.cursor > 0 {
                    let byte_cursor = self.byte_index(self.cursor);
                    let before = &self.value[..byte_cursor];
                    let word_start = before
                        .trim_end()
                        .rfind(|c: char| !c.is_alphanumeric())
                        .map(|i| i + 1)
                        .unwrap_or(0);
                    let char_start = self.value[..word_start].chars().count();
                    self.value.replace_range(word_start..byte_cursor, "");
                    self.cursor = char_start;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Insert a character at the cursor position.
    fn insert_char(&mut self, c: char) {
        let index = self.byte_index(self.cursor);
        self.value.insert(index, c);
        self.cursor += 1;
    }

    /// Remove the character at the given character position.
    fn remove_char(&mut self, char_index: usize) {
        let index = self.byte_index(char_index);
        self.value.remove(index);
    }

    /// Byte offset of the given character position.
    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Render the input field.
    ///
    /// Shows the placeholder dimmed when the value is empty; places the
    /// terminal cursor at the input cursor when focused.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let (text, style) = if self.value.is_empty() && !self.placeholder.is_empty() {
            (self.placeholder.clone(), Style::default().fg(Color::DarkGray))
        } else {
            (self.value.clone(), Style::default())
        };

        frame.render_widget(Paragraph::new(text).style(style), area);

        if focused {
            let x = area.x + (self.cursor as u16).min(area.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(x, area.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(input: &mut TextInput, text: &str) {
        for c in text.chars() {
            input.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_appends() {
        let mut input = TextInput::new();
        type_str(&mut input, "rust");
        assert_eq!(input.value(), "rust");
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn test_backspace_deletes_before_cursor() {
        let mut input = TextInput::new();
        type_str(&mut input, "rust");
        assert!(input.handle_input(key(KeyCode::Backspace)));
        assert_eq!(input.value(), "rus");
    }

    #[test]
    fn test_backspace_on_empty_is_unmodified() {
        let mut input = TextInput::new();
        assert!(!input.handle_input(key(KeyCode::Backspace)));
    }

    #[test]
    fn test_insert_mid_value() {
        let mut input = TextInput::new();
        type_str(&mut input, "rst");
        input.handle_input(key(KeyCode::Left));
        input.handle_input(key(KeyCode::Left));
        input.handle_input(key(KeyCode::Char('u')));
        assert_eq!(input.value(), "rust");
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut input = TextInput::new();
        type_str(&mut input, "rust");
        input.handle_input(key(KeyCode::Home));
        assert!(input.handle_input(key(KeyCode::Delete)));
        assert_eq!(input.value(), "ust");
    }

    #[test]
    fn test_home_and_end() {
        let mut input = TextInput::new();
        type_str(&mut input, "rust");
        input.handle_input(key(KeyCode::Home));
        assert_eq!(input.cursor(), 0);
        input.handle_input(key(KeyCode::End));
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = TextInput::new();
        type_str(&mut input, "rust");
        assert!(input.handle_input(ctrl('u')));
        assert!(input.is_empty());
    }

    #[test]
    fn test_ctrl_w_deletes_word() {
        let mut input = TextInput::new();
        type_str(&mut input, "one two");
        assert!(input.handle_input(ctrl('w')));
        assert_eq!(input.value(), "one ");
    }

    #[test]
    fn test_insert_str_drops_line_breaks() {
        let mut input = TextInput::new();
        input.insert_str("multi\nline\r");
        assert_eq!(input.value(), "multiline");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new();
        type_str(&mut input, "héllo");
        input.handle_input(key(KeyCode::Backspace));
        input.handle_input(key(KeyCode::Backspace));
        assert_eq!(input.value(), "hél");
        input.handle_input(key(KeyCode::Home));
        input.handle_input(key(KeyCode::Delete));
        assert_eq!(input.value(), "él");
    }

    #[test]
    fn test_set_value_moves_cursor_to_end() {
        let mut input = TextInput::new();
        input.set_value("tags");
        assert_eq!(input.cursor(), 4);
    }
}
