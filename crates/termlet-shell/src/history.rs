//! Input history with a recall cursor.

use termlet_types::Result;

/// Maximum number of history entries retained by default.
const MAX_HISTORY: usize = 200;

/// Recall direction for [`HistoryBuffer::navigate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    /// Toward older entries (the up-arrow direction).
    Older,
    /// Toward newer entries and ultimately the blank live line.
    Newer,
}

/// External key-value store for history persistence.
///
/// The embedding supplies this (browser local storage, a file, a test
/// map); the buffer only reads and writes JSON strings through it.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

impl KvStore for std::collections::HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        std::collections::HashMap::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

/// Ordered list of past inputs with a movable recall cursor.
///
/// The cursor ranges over `[0, len]`; `len` is the live position (an
/// empty in-progress line). Every append resets the cursor to the live
/// position. Entries are not de-duplicated. Once `max_entries` is
/// exceeded the oldest entry is evicted.
pub struct HistoryBuffer {
    entries: Vec<String>,
    cursor: usize,
    max_entries: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBuffer {
    /// Empty buffer with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    /// Empty buffer retaining at most `max_entries` entries.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            max_entries,
        }
    }

    /// Append an entry and reset the cursor to the live position.
    pub fn append(&mut self, entry: &str) {
        self.entries.push(entry.to_string());
        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len();
    }

    /// Move the cursor and return the entry there.
    ///
    /// `Older` at the oldest entry returns `None` without moving the
    /// cursor; `Newer` at or past the newest clamps to the live position
    /// and returns `Some("")`. The asymmetry lets callers distinguish
    /// "no more history" from "back to a blank input line".
    pub fn navigate(&mut self, direction: HistoryDirection) -> Option<String> {
        match direction {
            HistoryDirection::Older => {
                if self.cursor == 0 {
                    return None;
                }
                self.cursor -= 1;
                Some(self.entries[self.cursor].clone())
            },
            HistoryDirection::Newer => {
                if self.cursor + 1 >= self.entries.len() {
                    self.cursor = self.entries.len();
                    return Some(String::new());
                }
                self.cursor += 1;
                Some(self.entries[self.cursor].clone())
            },
        }
    }

    /// All entries, oldest first. Defensive copy.
    pub fn list(&self) -> Vec<String> {
        self.entries.clone()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the full list and reset the cursor to the new live
    /// position. The capacity bound still applies, evicting oldest-first.
    pub fn replace_all(&mut self, entries: Vec<String>) {
        self.entries = entries;
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(0..excess);
        }
        self.cursor = self.entries.len();
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Render as numbered lines for a `history` listing command.
    pub fn format_for_display(&self) -> String {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("  {}  {entry}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // -- Persistence hook --

    /// Serialize the entries as a JSON array into `store` under `key`.
    pub fn persist(&self, store: &mut dyn KvStore, key: &str) -> Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        store.set(key, &json);
        Ok(())
    }

    /// Load the entries stored under `key`, coercing non-string array
    /// elements to their JSON text. Missing or unparseable data leaves the
    /// buffer untouched; a bad store never fails the caller.
    pub fn restore(&mut self, store: &dyn KvStore, key: &str) {
        let Some(raw) = store.get(key) else {
            return;
        };
        let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(&raw) else {
            log::warn!("ignoring unparseable history under key '{key}'");
            return;
        };
        let entries = values
            .into_iter()
            .map(|v| match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect();
        self.replace_all(entries);
    }
}
