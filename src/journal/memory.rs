//! Captures entries in memory instead of sending them anywhere.

use super::{Journal, Priority};
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

/// One captured journal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub message: String,
    pub priority: Priority,
    pub fields: Vec<(String, String)>,
}

/// Keeps every entry it is handed. Clones share the same buffer, so a test can keep
/// one clone and give the other to a handler.
#[derive(Debug, Clone, Default)]
pub struct MemoryJournal {
    entries: Arc<Mutex<Vec<JournalEntry>>>,
}

impl MemoryJournal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    #[must_use]
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Takes everything received so far, leaving the buffer empty.
    #[must_use]
    pub fn drain(&self) -> Vec<JournalEntry> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Journal for MemoryJournal {
    fn send(
        &self,
        message: &str,
        priority: Priority,
        fields: &[(String, String)],
    ) -> io::Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(JournalEntry {
                message: message.to_string(),
                priority,
                fields: fields.to_vec(),
            });
        Ok(())
    }
}
