//! The journal handler: formats records and sends them to a [`Journal`] with the
//! priority of the record being formatted.
//!
//! Formatters only see an `io::Write` sink, so the priority cannot travel with the
//! bytes. Instead `handle` locks the shared [`JournalWriter`], stores the priority
//! in it, and passes the locked writer to the formatter as its sink. The lock is
//! held until the formatter returns, so no other record can swap the priority
//! between the store and the write it belongs to.

use super::Handler;
use crate::error::WriteError;
use crate::fmt::{Formatter, HandlerOptions, JsonFormatter, TextFormatter};
use crate::internal;
use crate::journal::{Journal, Priority, priority_for};
use crate::level::Level;
use crate::record::{Attr, MESSAGE_KEY, Record};

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Bytes of framing the raw text formatter puts in front of the message: the
/// quoted empty key and its `=` (`""=`).
pub const RAW_FRAME_LEN: usize = 3;

/// What the journal's `MESSAGE` field ends up holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The whole serialized record (JSON).
    #[default]
    Structured,
    /// Only the log message.
    Raw,
}

impl Mode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Structured => "json",
            Self::Raw => "raw",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "structured" => Ok(Self::Structured),
            "raw" => Ok(Self::Raw),
            _ => Err(crate::Error::InvalidMode(s.to_string())),
        }
    }
}

/// The byte sink formatters write into. Every `write` call becomes one journal
/// entry at the currently recorded priority.
pub struct JournalWriter {
    journal: Arc<dyn Journal>,
    mode: Mode,
    current_priority: Priority,
    fields: Vec<(String, String)>,
}

impl JournalWriter {
    #[must_use]
    pub fn new(journal: Arc<dyn Journal>, mode: Mode) -> Self {
        Self {
            journal,
            mode,
            current_priority: Priority::Info,
            fields: Vec::new(),
        }
    }

    /// Priority used by the next `write`.
    pub const fn set_priority(&mut self, priority: Priority) {
        self.current_priority = priority;
    }

    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.current_priority
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Extra journal field sent with every entry.
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push((key.into(), value.into()));
    }

    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    fn payload<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        match self.mode {
            Mode::Structured => buf,
            Mode::Raw => buf.get(RAW_FRAME_LEN..).unwrap_or_default(),
        }
    }
}

impl Write for JournalWriter {
    /// Consumes all of `buf` or nothing. A failed send surfaces as an `io::Error`
    /// of kind `Other` carrying a [`WriteError`], never as a short count, so
    /// `write_all` does not retry it.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let payload = String::from_utf8_lossy(self.payload(buf));
        match self
            .journal
            .send(&payload, self.current_priority, &self.fields)
        {
            Ok(()) => Ok(buf.len()),
            Err(e) => {
                internal::warn(
                    "JOURNAL",
                    &format!("Send failed at priority {}: {e}", self.current_priority),
                );
                Err(io::Error::other(WriteError::new(payload.into_owned(), e)))
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for JournalWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JournalWriter")
            .field("mode", &self.mode)
            .field("current_priority", &self.current_priority)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Reduces a record to its bare message: the root-level message key becomes empty
/// and every other attribute is dropped, including `msg` attributes inside groups.
#[must_use]
pub fn raw_replace_attr(groups: &[String], mut attr: Attr) -> Attr {
    if groups.is_empty() && attr.key == MESSAGE_KEY {
        attr.key = String::new();
        attr
    } else {
        Attr::empty()
    }
}

/// Sends formatted records to the journal at their own priority.
///
/// Clones and handlers derived through [`Handler::with_attrs`] /
/// [`Handler::with_group`] share one writer and one lock. Handlers built by
/// separate constructor calls are independent.
#[derive(Clone)]
pub struct JournalHandler {
    formatter: Arc<dyn Formatter>,
    writer: Arc<Mutex<JournalWriter>>,
    mode: Mode,
}

impl JournalHandler {
    /// Structured mode: the journal message is the JSON form of the record.
    #[must_use]
    pub fn json(journal: Arc<dyn Journal>, options: HandlerOptions) -> Self {
        internal::debug(
            "HANDLER",
            &format!("Creating JSON journal handler (level={})", options.level),
        );
        Self::with_formatter(
            journal,
            Mode::Structured,
            Arc::new(JsonFormatter::new(options)),
        )
    }

    /// Raw mode: the journal message is only the record's message. Records below
    /// `level` are reported disabled and never formatted.
    #[must_use]
    pub fn raw(journal: Arc<dyn Journal>, level: Level) -> Self {
        internal::debug(
            "HANDLER",
            &format!("Creating raw journal handler (level={level})"),
        );
        let options = HandlerOptions::new()
            .level(level)
            .replace_attr(raw_replace_attr);
        Self::with_formatter(journal, Mode::Raw, Arc::new(TextFormatter::new(options)))
    }

    fn with_formatter(
        journal: Arc<dyn Journal>,
        mode: Mode,
        formatter: Arc<dyn Formatter>,
    ) -> Self {
        Self {
            formatter,
            writer: Arc::new(Mutex::new(JournalWriter::new(journal, mode))),
            mode,
        }
    }

    /// Adds a journal field to every entry this handler (and every handler sharing
    /// its writer) sends.
    #[must_use]
    pub fn with_field(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.lock_writer().add_field(key, value);
        self
    }

    /// Sets `SYSLOG_IDENTIFIER`, the name `journalctl -t` filters on.
    #[must_use]
    pub fn with_identifier(self, identifier: impl Into<String>) -> Self {
        self.with_field("SYSLOG_IDENTIFIER", identifier)
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// True when both handlers feed the same writer, i.e. serialize on the same lock.
    #[must_use]
    pub fn shares_writer(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }

    /// The writer state is a `Copy` priority plus immutable config; a panic while
    /// holding the lock cannot leave it half-written.
    fn lock_writer(&self) -> std::sync::MutexGuard<'_, JournalWriter> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn derive(&self, formatter: Box<dyn Formatter>) -> Self {
        Self {
            formatter: Arc::from(formatter),
            writer: Arc::clone(&self.writer),
            mode: self.mode,
        }
    }
}

impl Handler for JournalHandler {
    fn enabled(&self, level: Level) -> bool {
        self.formatter.enabled(level)
    }

    fn handle(&self, record: &Record) -> Result<(), crate::Error> {
        let mut writer = self.lock_writer();
        writer.set_priority(priority_for(record.level));
        self.formatter.format(record, &mut *writer)?;
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        if attrs.is_empty() {
            return Arc::new(self.clone());
        }
        Arc::new(self.derive(self.formatter.with_attrs(attrs)))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        if name.is_empty() {
            return Arc::new(self.clone());
        }
        Arc::new(self.derive(self.formatter.with_group(name)))
    }
}

impl fmt::Debug for JournalHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JournalHandler")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::MemoryJournal;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn enabled_does_not_wait_for_writer_lock() {
        let handler = JournalHandler::raw(Arc::new(MemoryJournal::new()), Level::Warn);
        let guard = handler.lock_writer();

        let (tx, rx) = mpsc::channel();
        let reader = handler.clone();
        thread::spawn(move || {
            let _ = tx.send((reader.enabled(Level::Error), reader.enabled(Level::Info)));
        });

        let result = rx.recv_timeout(Duration::from_secs(5));
        drop(guard);
        assert_eq!(result, Ok((true, false)));
    }

    #[test]
    fn enabled_leaves_priority_alone() {
        let handler =
            JournalHandler::json(Arc::new(MemoryJournal::new()), HandlerOptions::new());
        handler.lock_writer().set_priority(Priority::Error);

        assert!(!handler.enabled(Level::Debug));
        assert!(handler.enabled(Level::Critical));
        assert_eq!(handler.lock_writer().priority(), Priority::Error);
    }

    #[test]
    fn handle_sets_priority_before_writing() {
        let journal = MemoryJournal::new();
        let handler = JournalHandler::json(Arc::new(journal.clone()), HandlerOptions::new());

        handler.handle(&Record::new(Level::Error, "boom")).unwrap();

        assert_eq!(handler.lock_writer().priority(), Priority::Error);
        assert_eq!(journal.entries()[0].priority, Priority::Error);
    }

    #[test]
    fn derived_handlers_share_the_lock() {
        let handler = JournalHandler::raw(Arc::new(MemoryJournal::new()), Level::Info);
        let derived = handler.derive(handler.formatter.with_group("req"));
        assert!(handler.shares_writer(&derived));

        let other = JournalHandler::raw(Arc::new(MemoryJournal::new()), Level::Info);
        assert!(!handler.shares_writer(&other));
    }
}
