//! The per-round action log.

use guessduel_protocol::PlayerSlot;
use serde::{Deserialize, Serialize};

/// How an entry is treated by the visibility filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A guess. Always visible to both players.
    Guess,
    /// Any other action or its private narration.
    Action,
    /// Engine narration with no author, visible to both players.
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub author: Option<PlayerSlot>,
    pub kind: EntryKind,
    pub text: String,
}

/// Append-only within a round; cleared when the next round starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLog {
    entries: Vec<LogEntry>,
}

impl ActionLog {
    pub fn guess(&mut self, author: PlayerSlot, text: impl Into<String>) {
        self.push(Some(author), EntryKind::Guess, text.into());
    }

    pub fn action(&mut self, author: PlayerSlot, text: impl Into<String>) {
        self.push(Some(author), EntryKind::Action, text.into());
    }

    pub fn system(&mut self, text: impl Into<String>) {
        self.push(None, EntryKind::System, text.into());
    }

    fn push(&mut self, author: Option<PlayerSlot>, kind: EntryKind, text: String) {
        self.entries.push(LogEntry { author, kind, text });
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

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Every entry's text, in order. Used for end-of-round reveals.
    pub fn texts(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.text.clone()).collect()
    }
}
