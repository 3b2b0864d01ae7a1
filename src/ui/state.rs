//! Terminal history - the scrollback of echoed commands and notices

use crate::engine::{Notice, NoticeKind};
use std::collections::VecDeque;

/// Default number of history lines to keep
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    System,
    User,
    Error,
    Success,
}

/// One line of history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLine {
    pub id: u64,
    pub kind: LineKind,
    pub content: String,
}

/// Bounded history shown above the active view
#[derive(Debug)]
pub struct TerminalHistory {
    lines: VecDeque<HistoryLine>,
    limit: usize,
    next_id: u64,
}

impl Default for TerminalHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl TerminalHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            limit: limit.max(1),
            next_id: 0,
        }
    }

    /// Add a line, dropping the oldest once the limit is reached
    pub fn push(&mut self, kind: LineKind, content: impl Into<String>) {
        if self.lines.len() >= self.limit {
            self.lines.pop_front();
        }
        self.next_id += 1;
        self.lines.push_back(HistoryLine {
            id: self.next_id,
            kind,
            content: content.into(),
        });
    }

    /// Echo what the user typed
    pub fn push_command(&mut self, raw: &str) {
        self.push(LineKind::User, format!("> {}", raw.trim()));
    }

    pub fn push_notice(&mut self, notice: &Notice) {
        let kind = match notice.kind {
            NoticeKind::System => LineKind::System,
            NoticeKind::Success => LineKind::Success,
            NoticeKind::Error => LineKind::Error,
        };
        self.push(kind, notice.text.clone());
    }

    pub fn lines(&self) -> impl Iterator<Item = &HistoryLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
