//! The object applications hold on to. Wraps a shared [`Handler`] and builds
//! records for it, so call sites never deal with records or the journal directly.
//!
//! There is no global logger: build one at startup and pass it (or clones of it)
//! to whatever needs to log.

mod builder;
mod from_config;

pub use builder::LoggerBuilder;

use crate::handler::Handler;
use crate::level::Level;
use crate::record::{Attr, Record};
use std::fmt;
use std::sync::Arc;

/// Cheap to clone; clones share the handler and therefore its writer lock.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl Logger {
    #[must_use]
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Lets callers skip expensive argument preparation for levels nobody will see.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    /// Core dispatch. Disabled levels return before a record is even built.
    ///
    /// # Errors
    /// Returns the handler's failure unchanged, including [`crate::Error::Write`]
    /// which still carries the text that was not written.
    pub fn log(
        &self,
        level: Level,
        msg: &str,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> Result<(), crate::Error> {
        if !self.handler.enabled(level) {
            return Ok(());
        }
        let record = Record::new(level, msg).attrs(attrs);
        self.handler.handle(&record)
    }

    /// # Errors
    /// See [`Logger::log`].
    pub fn debug(&self, msg: &str) -> Result<(), crate::Error> {
        self.log(Level::Debug, msg, [])
    }

    /// # Errors
    /// See [`Logger::log`].
    pub fn info(&self, msg: &str) -> Result<(), crate::Error> {
        self.log(Level::Info, msg, [])
    }

    /// # Errors
    /// See [`Logger::log`].
    pub fn warn(&self, msg: &str) -> Result<(), crate::Error> {
        self.log(Level::Warn, msg, [])
    }

    /// # Errors
    /// See [`Logger::log`].
    pub fn error(&self, msg: &str) -> Result<(), crate::Error> {
        self.log(Level::Error, msg, [])
    }

    /// # Errors
    /// See [`Logger::log`].
    pub fn critical(&self, msg: &str) -> Result<(), crate::Error> {
        self.log(Level::Critical, msg, [])
    }

    /// A logger whose records all carry `attrs`.
    #[must_use]
    pub fn with(&self, attrs: Vec<Attr>) -> Self {
        Self {
            handler: self.handler.with_attrs(attrs),
        }
    }

    /// A logger whose later attributes all sit under `name`.
    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        Self {
            handler: self.handler.with_group(name),
        }
    }

    #[must_use]
    pub const fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}
