//! Single-line text buffer with a character cursor.

/// Character buffer and cursor behind a picker's input line.
///
/// Stored as `Vec<char>` so the cursor is a plain character index.
#[derive(Debug, Clone, Default)]
pub struct TextEditState {
    chars: Vec<char>,
    cursor: usize,
}

impl TextEditState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    /// Replace the contents and put the cursor at the end.
    pub fn set_value(&mut self, s: &str) {
        self.chars = s.chars().collect();
        self.cursor = self.chars.len();
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Cursor position as a character index (0..=len).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn insert_char(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Insert `s` at the cursor, dropping control characters (pasted newlines).
    pub fn insert_str(&mut self, s: &str) -> bool {
        let before = self.chars.len();
        for c in s.chars().filter(|c| !c.is_control()) {
            self.insert_char(c);
        }
        self.chars.len() != before
    }

    /// Backspace. Returns whether anything was removed.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    /// Delete. Returns whether anything was removed.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.chars.len() {
            return false;
        }
        self.chars.remove(self.cursor);
        true
    }

    /// Ctrl+W: drop trailing spaces, then the word before the cursor.
    pub fn delete_word_back(&mut self) -> bool {
        let end = self.cursor;
        let mut start = end;
        while start > 0 && self.chars[start - 1] == ' ' {
            start -= 1;
        }
        while start > 0 && self.chars[start - 1] != ' ' {
            start -= 1;
        }
        if start == end {
            return false;
        }
        self.chars.drain(start..end);
        self.cursor = start;
        true
    }

    /// Ctrl+U: drop everything before the cursor.
    pub fn kill_to_start(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.chars.drain(..self.cursor);
        self.cursor = 0;
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.chars.len();
    }

    pub fn reset(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }
}
