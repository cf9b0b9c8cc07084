//! Input history for the terminal, navigated with the arrow keys.
//!
//! Entries are kept most-recent-first and capped at [`HISTORY_CAP`]. The
//! cursor lives in `[-1, len - 1]` where `-1` means "editing a fresh line".
//! Movement past either end clamps rather than wraps.

use std::collections::VecDeque;

pub const HISTORY_CAP: usize = 50;

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    cap: usize,
    index: isize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_cap(HISTORY_CAP)
    }
}

impl History {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap: cap.max(1),
            index: -1,
        }
    }

    /// Record a submitted line. Blank lines are ignored; the cursor resets.
    pub fn push(&mut self, line: &str) {
        self.index = -1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }
        self.entries.push_front(trimmed.to_string());
        self.entries.truncate(self.cap);
    }

    /// Step towards older entries (arrow up).
    pub fn previous(&mut self) -> String {
        let last = self.entries.len() as isize - 1;
        self.index = (self.index + 1).min(last);
        self.current()
    }

    /// Step towards newer entries (arrow down); past the newest yields "".
    pub fn next(&mut self) -> String {
        self.index = (self.index - 1).max(-1);
        self.current()
    }

    pub fn reset_cursor(&mut self) {
        self.index = -1;
    }

    pub fn index(&self) -> isize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn current(&self) -> String {
        usize::try_from(self.index)
            .ok()
            .and_then(|i| self.entries.get(i))
            .cloned()
            .unwrap_or_default()
    }
}
