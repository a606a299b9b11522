//! Append-only log of received frames.

use crate::domain::Incoming;

/// One received frame and the local time it arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub received_at: i64,
    pub incoming: Incoming,
}

/// Received frames in arrival order.
///
/// Entries are never reordered, merged or removed, and duplicates are kept.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Vec<LogEntry>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame and return the stored entry.
    pub fn append(&mut self, incoming: Incoming, received_at: i64) -> &LogEntry {
        self.entries.push(LogEntry {
            received_at,
            incoming,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
