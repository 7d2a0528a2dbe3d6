//! Command terminal panel: append-only output log plus one editable line.

pub mod input;

use std::collections::VecDeque;

use crate::error::Result;
use crate::terminal::input::InputLine;

/// Default cap on retained output lines.
pub const DEFAULT_MAX_LINES: usize = 1000;
/// Line appended when the command endpoint cannot be reached.
pub const EXECUTE_ERROR_LINE: &str = "Error: Could not execute command";

/// What pressing Enter on the input line should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank input; nothing happens.
    Ignored,
    /// `clear` / `cls`: the log was wiped locally.
    Cleared,
    /// A command is already running.
    Busy,
    /// Send this command to the server.
    Execute(String),
}

/// State for the command terminal panel.
#[derive(Debug)]
pub struct CommandTerminal {
    lines: VecDeque<String>,
    pub input: InputLine,
    max_lines: usize,
    /// Lines scrolled up from the bottom (0 = following output).
    pub scroll_offset: usize,
    /// A command has been sent and has not answered yet.
    pub pending: bool,
}

impl Default for CommandTerminal {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

impl CommandTerminal {
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            input: InputLine::with_history_limit(max_lines),
            max_lines: max_lines.max(1),
            scroll_offset: 0,
            pending: false,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Append one line, dropping the oldest past the cap.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }

    /// Handle Enter on the input line.
    pub fn submit(&mut self) -> Submission {
        if self.input.text.trim().is_empty() {
            self.input.take();
            return Submission::Ignored;
        }
        if self.pending {
            return Submission::Busy;
        }
        let command = self.input.take();
        let trimmed = command.trim();
        if trimmed == "clear" || trimmed == "cls" {
            self.lines.clear();
            self.scroll_offset = 0;
            return Submission::Cleared;
        }
        self.push_line(format!("> {}", command));
        self.pending = true;
        self.scroll_offset = 0;
        Submission::Execute(command)
    }

    /// Append the outcome of a finished command.
    pub fn finish(&mut self, result: &Result<String>) {
        self.pending = false;
        match result {
            Ok(output) => {
                let output = output.trim_end_matches(['\r', '\n']);
                if output.is_empty() {
                    return;
                }
                for line in output.split('\n') {
                    self.push_line(line.trim_end_matches('\r'));
                }
            }
            Err(_) => self.push_line(EXECUTE_ERROR_LINE),
        }
    }

    pub fn scroll_up(&mut self, amount: usize) {
        let max = self.lines.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + amount).min(max);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    /// The slice of lines to show in a viewport of `height` rows.
    pub fn visible_lines(&self, height: usize) -> Vec<&str> {
        let end = self.lines.len().saturating_sub(self.scroll_offset);
        let start = end.saturating_sub(height);
        self.lines
            .range(start..end)
            .map(String::as_str)
            .collect()
    }
}
