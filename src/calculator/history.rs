//! Bounded, newest-first log of completed computations.

use serde::Serialize;
use std::collections::VecDeque;

/// Number of entries kept when no limit is configured.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// A single completed computation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// Full expression including the result, e.g. `5 + 3 = 8`.
    pub expression: String,
    /// The numeric result.
    pub result: f64,
    /// Sequence position within the session, starting at 1.
    pub order: u64,
}

/// Session history. The front is the most recent entry.
#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
    next_order: u64,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Create an empty history holding at most `limit` entries (at least one).
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            limit,
            next_order: 1,
        }
    }

    /// Record a computation, evicting the oldest entry when full.
    pub fn push(&mut self, expression: String, result: f64) -> &HistoryEntry {
        let entry = HistoryEntry {
            expression,
            result,
            order: self.next_order,
        };
        self.next_order += 1;

        self.entries.push_front(entry);
        self.entries.truncate(self.limit);

        &self.entries[0]
    }

    /// Entries from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Serialize the entries (newest first) as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let entries: Vec<&HistoryEntry> = self.entries.iter().collect();
        serde_json::to_string_pretty(&entries)
    }
}
