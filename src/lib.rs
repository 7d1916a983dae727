//! `journalog` - structured logging into the systemd journal.
//!
//! Records keep their severity all the way down: each entry lands in the journal
//! with the `PRIORITY` matching the level it was logged at, even when many
//! threads log through the same handler at once.
//!
//! Two message shapes are available:
//! - JSON (default): the journal `MESSAGE` holds the whole record as a JSON object
//! - raw: the journal `MESSAGE` holds only the log message
//!
//! # Example
//!
//! ```
//! use journalog::{Attr, Level, Logger, MemoryJournal, Priority};
//! use std::sync::Arc;
//!
//! let journal = MemoryJournal::new();
//! let logger = Logger::builder()
//!     .level(Level::Debug)
//!     .raw()
//!     .journal(Arc::new(journal.clone()))
//!     .build()
//!     .unwrap();
//!
//! logger.warn("disk almost full").unwrap();
//! logger.log(Level::Info, "request done", [Attr::new("status", 200)]).unwrap();
//!
//! let entries = journal.entries();
//! assert_eq!(entries[0].message, "disk almost full");
//! assert_eq!(entries[0].priority, Priority::Warning);
//! ```

pub mod config;
pub mod error;
pub mod fmt;
pub mod handler;
pub mod internal;
pub mod journal;
pub mod level;
pub mod logger;
pub mod record;

pub use config::Config;
pub use error::{Error, WriteError};
pub use fmt::{Formatter, HandlerOptions, JsonFormatter, ReplaceAttr, TextFormatter};
pub use handler::{Handler, JournalHandler, JournalWriter, Mode};
pub use journal::{Journal, JournalEntry, MemoryJournal, Priority, priority_for};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use record::{Attr, Record, Value};

#[cfg(target_os = "linux")]
pub use journal::SystemJournal;
