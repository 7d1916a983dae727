//! The send primitive at the bottom of the pipeline. `Journal` abstracts it so the
//! handler can be exercised without a running journald.

mod memory;
mod priority;
#[cfg(target_os = "linux")]
mod system;

pub use memory::{JournalEntry, MemoryJournal};
pub use priority::{Priority, priority_for};
#[cfg(target_os = "linux")]
pub use system::SystemJournal;

use std::io;

/// Anything that accepts one entry at a time: message text, priority, and extra fields.
pub trait Journal: Send + Sync {
    /// Transmits a single entry. Synchronous; no buffering.
    ///
    /// # Errors
    /// Whatever the transport reports (journald socket missing, entry too large, ...).
    fn send(&self, message: &str, priority: Priority, fields: &[(String, String)])
    -> io::Result<()>;
}
