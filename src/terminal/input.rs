//! Single editable input line with a byte cursor and session history.

use std::collections::VecDeque;

use super::DEFAULT_MAX_LINES;

/// The prompt line of the command terminal.
#[derive(Debug)]
pub struct InputLine {
    pub text: String,
    /// Byte offset into `text`, always on a char boundary.
    pub cursor: usize,
    history: VecDeque<String>,
    history_limit: usize,
    /// Position while browsing history; `None` when editing a fresh line.
    history_index: Option<usize>,
}

impl Default for InputLine {
    fn default() -> Self {
        Self::with_history_limit(DEFAULT_MAX_LINES)
    }
}

impl InputLine {
    /// An empty line that remembers at most `limit` submitted commands.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            history: VecDeque::new(),
            history_limit: limit.max(1),
            history_index: None,
        }
    }

    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if let Some(prev) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
            self.text.remove(self.cursor);
        }
    }

    /// Delete the character under the cursor.
    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    /// Move cursor left by one character.
    pub fn move_left(&mut self) {
        if let Some(prev) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    /// Move cursor right by one character.
    pub fn move_right(&mut self) {
        if let Some(next) = self.text[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Take the current text, leaving an empty line. Non-blank lines are
    /// remembered in history (consecutive duplicates collapsed, oldest
    /// dropped past the limit).
    pub fn take(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        self.history_index = None;
        if !text.trim().is_empty() && self.history.back() != Some(&text) {
            self.history.push_back(text.clone());
            while self.history.len() > self.history_limit {
                self.history.pop_front();
            }
        }
        text
    }

    /// Replace the line with the previous history entry.
    pub fn history_previous(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.history_index {
            None => self.history.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.load_history(Some(index));
    }

    /// Replace the line with the next history entry, or clear it past the end.
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(i) if i + 1 < self.history.len() => self.load_history(Some(i + 1)),
            Some(_) => self.load_history(None),
        }
    }

    fn load_history(&mut self, index: Option<usize>) {
        self.history_index = index;
        self.text = index
            .and_then(|i| self.history.get(i).cloned())
            .unwrap_or_default();
        self.cursor = self.text.len();
    }
}
