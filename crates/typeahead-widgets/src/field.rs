//! The free-text input line of a picker.

use crate::style::TypeAheadStyle;
use crate::text_edit::TextEditState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::cell::Cell;

/// What a key did to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    /// The text changed.
    Changed,
    /// Only the cursor moved.
    Moved,
    /// Not an editing key.
    Ignored,
}

/// Single-line input with a placeholder.
///
/// Text wider than the input scrolls horizontally so the cursor stays in
/// view.
#[derive(Debug, Clone, Default)]
pub struct Field {
    editor: TextEditState,
    placeholder: String,
    /// First char drawn, kept between renders.
    offset: Cell<usize>,
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn text(&self) -> String {
        self.editor.value()
    }

    pub fn is_empty(&self) -> bool {
        self.editor.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.editor.cursor()
    }

    pub fn set_text(&mut self, text: &str) {
        self.editor.set_value(text);
    }

    pub fn clear(&mut self) {
        self.editor.reset();
    }

    /// Apply an editing key. Navigation keys of the list are not handled here.
    pub fn apply_key(&mut self, key: &KeyEvent) -> FieldEdit {
        let changed = |did: bool| {
            if did {
                FieldEdit::Changed
            } else {
                FieldEdit::Ignored
            }
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('w') if ctrl => changed(self.editor.delete_word_back()),
            KeyCode::Char('u') if ctrl => changed(self.editor.kill_to_start()),
            KeyCode::Char('a') if ctrl => {
                self.editor.move_home();
                FieldEdit::Moved
            }
            KeyCode::Char('e') if ctrl => {
                self.editor.move_end();
                FieldEdit::Moved
            }
            KeyCode::Char(_) if ctrl => FieldEdit::Ignored,
            KeyCode::Char(c) => {
                self.editor.insert_char(c);
                FieldEdit::Changed
            }
            KeyCode::Backspace => changed(self.editor.delete_back()),
            KeyCode::Delete => changed(self.editor.delete_forward()),
            KeyCode::Left => {
                self.editor.move_left();
                FieldEdit::Moved
            }
            KeyCode::Right => {
                self.editor.move_right();
                FieldEdit::Moved
            }
            KeyCode::Home => {
                self.editor.move_home();
                FieldEdit::Moved
            }
            KeyCode::End => {
                self.editor.move_end();
                FieldEdit::Moved
            }
            _ => FieldEdit::Ignored,
        }
    }

    /// Insert pasted text. Returns whether the text changed.
    pub fn paste(&mut self, text: &str) -> bool {
        self.editor.insert_str(text)
    }

    /// The input line as spans for a `width` cells wide input. The cursor cell
    /// is only drawn while focused.
    pub fn line(&self, style: &TypeAheadStyle, focused: bool, width: usize) -> Line<'static> {
        let chars = self.editor.chars();
        if chars.is_empty() {
            let mut spans = Vec::new();
            if focused {
                spans.push(Span::styled(" ", style.cursor));
            }
            if !self.placeholder.is_empty() {
                spans.push(Span::styled(self.placeholder.clone(), style.placeholder));
            }
            return Line::from(spans);
        }
        if !focused {
            self.offset.set(0);
            return Line::from(Span::styled(self.editor.value(), style.input));
        }

        let cursor = self.editor.cursor();
        let offset = self.offset.get();
        let offset = if cursor < offset {
            cursor
        } else if width > 0 && cursor >= offset + width {
            cursor + 1 - width
        } else {
            offset.min(chars.len())
        };
        self.offset.set(offset);

        let end = (offset + width.max(1)).min(chars.len());
        let mut spans = Vec::new();
        let before: String = chars[offset..cursor].iter().collect();
        if !before.is_empty() {
            spans.push(Span::styled(before, style.input));
        }
        match chars.get(cursor) {
            Some(c) => {
                spans.push(Span::styled(c.to_string(), style.cursor));
                let after: String = chars[(cursor + 1).min(end)..end].iter().collect();
                if !after.is_empty() {
                    spans.push(Span::styled(after, style.input));
                }
            }
            None => spans.push(Span::styled(" ", style.cursor)),
        }
        Line::from(spans)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, style: &TypeAheadStyle, focused: bool) {
        if area.height == 0 {
            return;
        }
        let line = self.line(style, focused, area.width as usize);
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char(c))
        }
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn typing_changes_text() {
        let mut field = Field::new();
        assert_eq!(field.apply_key(&key(KeyCode::Char('a'))), FieldEdit::Changed);
        assert_eq!(field.apply_key(&key(KeyCode::Char('b'))), FieldEdit::Changed);
        assert_eq!(field.text(), "ab");
    }

    #[test]
    fn backspace_on_empty_is_ignored() {
        let mut field = Field::new();
        assert_eq!(field.apply_key(&key(KeyCode::Backspace)), FieldEdit::Ignored);
    }

    #[test]
    fn arrows_only_move() {
        let mut field = Field::new();
        field.set_text("ab");
        assert_eq!(field.apply_key(&key(KeyCode::Left)), FieldEdit::Moved);
        assert_eq!(field.cursor(), 1);
        assert_eq!(field.apply_key(&key(KeyCode::Home)), FieldEdit::Moved);
        assert_eq!(field.cursor(), 0);
        assert_eq!(field.text(), "ab");
    }

    #[test]
    fn list_keys_are_ignored() {
        let mut field = Field::new();
        for code in [KeyCode::Up, KeyCode::Down, KeyCode::Enter, KeyCode::Esc, KeyCode::Tab] {
            assert_eq!(field.apply_key(&key(code)), FieldEdit::Ignored);
        }
    }

    #[test]
    fn control_chords() {
        let mut field = Field::new();
        field.set_text("ada lovelace");
        assert_eq!(field.apply_key(&ctrl('w')), FieldEdit::Changed);
        assert_eq!(field.text(), "ada ");
        assert_eq!(field.apply_key(&ctrl('x')), FieldEdit::Ignored);
        assert_eq!(field.apply_key(&ctrl('u')), FieldEdit::Changed);
        assert!(field.is_empty());
    }

    #[test]
    fn placeholder_shows_when_empty() {
        let field = Field::new().with_placeholder("Search");
        let style = TypeAheadStyle::default();
        assert_eq!(line_text(&field.line(&style, false, 20)), "Search");
        assert_eq!(line_text(&field.line(&style, true, 20)), " Search");
    }

    #[test]
    fn long_text_scrolls_to_keep_cursor_visible() {
        let mut field = Field::new();
        field.set_text("abcdefghij");
        let style = TypeAheadStyle::default();
        assert_eq!(line_text(&field.line(&style, true, 4)), "hij ");

        for _ in 0..9 {
            field.apply_key(&key(KeyCode::Left));
        }
        assert_eq!(field.cursor(), 1);
        assert_eq!(line_text(&field.line(&style, true, 4)), "bcde");

        field.apply_key(&key(KeyCode::Home));
        let line = field.line(&style, true, 4);
        assert_eq!(line_text(&line), "abcd");
        assert_eq!(line.spans[0].content, "a");
        assert_eq!(line.spans[0].style, style.cursor);
    }

    #[test]
    fn cursor_cell_splits_text() {
        let mut field = Field::new();
        field.set_text("abc");
        field.apply_key(&key(KeyCode::Left));
        let style = TypeAheadStyle::default();
        let line = field.line(&style, true, 20);
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[1].content, "c");
        assert_eq!(line.spans[1].style, style.cursor);
    }
}
