#![forbid(unsafe_code)]

//! Grapheme-aware text editor used by text and date fields.
//!
//! Only the editor state lives here; drawing is the renderer's job, which
//! gets the text and caret through [`super::BodyLine`].

use iform_core::event::{KeyCode, KeyEvent};
use unicode_segmentation::UnicodeSegmentation;

/// Editable text with a caret.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    /// Text value.
    value: String,
    /// Cursor position (grapheme index).
    cursor: usize,
    /// Keep pasted line breaks instead of flattening them.
    multiline: bool,
}

impl TextInput {
    /// Create a new empty text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep line breaks from pasted text (builder).
    #[must_use]
    pub fn with_multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value and place the caret.
    pub fn replace(&mut self, value: impl Into<String>, cursor: usize) {
        self.value = value.into();
        self.cursor = cursor.min(self.grapheme_count());
    }

    /// Get the cursor position (grapheme index).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The caret as `(line, grapheme column)`.
    pub fn caret_position(&self) -> (usize, usize) {
        let mut line = 0;
        let mut column = 0;
        for g in self.value.graphemes(true).take(self.cursor) {
            if g == "\n" {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    /// Whether the value is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Apply an editing or caret key.
    ///
    /// Returns `true` if the key was consumed. Control chords are left to
    /// the caller.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !key.is_press() || key.ctrl() {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.insert_char(c);
                true
            }
            KeyCode::Backspace => {
                self.delete_char_back();
                true
            }
            KeyCode::Delete => {
                self.delete_char_forward();
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.grapheme_count());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.grapheme_count();
                true
            }
            _ => false,
        }
    }

    /// Insert a string at the caret. Line breaks are kept as `\n` when the
    /// input is multiline and become spaces otherwise.
    pub fn insert_str(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n");
        for c in text.chars() {
            let c = match c {
                '\n' | '\r' if self.multiline => '\n',
                '\n' | '\r' => ' ',
                c => c,
            };
            self.insert_char(c);
        }
    }

    fn insert_char(&mut self, c: char) {
        let before = self.grapheme_count();
        let byte_offset = self.grapheme_byte_offset(self.cursor);
        self.value.insert(byte_offset, c);
        // A combining mark merges into the previous grapheme.
        if self.grapheme_count() > before {
            self.cursor += 1;
        }
    }

    fn delete_char_back(&mut self) {
        if self.cursor > 0 {
            let byte_start = self.grapheme_byte_offset(self.cursor - 1);
            let byte_end = self.grapheme_byte_offset(self.cursor);
            self.value.drain(byte_start..byte_end);
            self.cursor -= 1;
        }
    }

    fn delete_char_forward(&mut self) {
        if self.cursor < self.grapheme_count() {
            let byte_start = self.grapheme_byte_offset(self.cursor);
            let byte_end = self.grapheme_byte_offset(self.cursor + 1);
            self.value.drain(byte_start..byte_end);
        }
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iform_core::event::{KeyEventKind, Modifiers};

    fn filled(value: &str) -> TextInput {
        let mut input = TextInput::new();
        input.replace(value, usize::MAX);
        input
    }

    fn press(input: &mut TextInput, code: KeyCode) -> bool {
        input.handle_key(&KeyEvent::new(code))
    }

    fn type_str(input: &mut TextInput, s: &str) {
        for c in s.chars() {
            press(input, KeyCode::Char(c));
        }
    }

    #[test]
    fn insert_and_move() {
        let mut input = TextInput::new();
        type_str(&mut input, "hllo");
        assert_eq!(input.cursor(), 4);
        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Right);
        press(&mut input, KeyCode::Char('e'));
        assert_eq!(input.value(), "hello");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut input = filled("ab");
        press(&mut input, KeyCode::Right);
        assert_eq!(input.cursor(), 2);
        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Left);
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn backspace_and_delete() {
        let mut input = filled("abc");
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "ab");
        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Delete);
        assert_eq!(input.value(), "b");
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn graphemes_edit_as_one_unit() {
        let mut input = filled("cafe\u{301}");
        assert_eq!(input.cursor(), 4);
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "caf");
    }

    #[test]
    fn ctrl_chords_and_releases_are_ignored() {
        let mut input = TextInput::new();
        let ctrl_a = KeyEvent::new(KeyCode::Char('a')).with_modifiers(Modifiers::CTRL);
        assert!(!input.handle_key(&ctrl_a));
        let release = KeyEvent::new(KeyCode::Char('a')).with_kind(KeyEventKind::Release);
        assert!(!input.handle_key(&release));
        assert!(input.is_empty());
    }

    #[test]
    fn enter_is_not_consumed() {
        let mut input = TextInput::new();
        assert!(!press(&mut input, KeyCode::Enter));
        assert!(!press(&mut input, KeyCode::Tab));
    }

    #[test]
    fn paste_flattens_newlines() {
        let mut input = TextInput::new();
        input.insert_str("a\nb");
        assert_eq!(input.value(), "a b");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn multiline_paste_keeps_line_breaks() {
        let mut input = TextInput::new().with_multiline(true);
        input.insert_str("one\r\ntwo\rsix");
        assert_eq!(input.value(), "one\ntwo\nsix");
        assert_eq!(input.caret_position(), (2, 3));
        press(&mut input, KeyCode::Home);
        assert_eq!(input.caret_position(), (0, 0));
        for _ in 0..5 {
            press(&mut input, KeyCode::Right);
        }
        assert_eq!(input.caret_position(), (1, 1));
    }
}
