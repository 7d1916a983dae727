//! Stepwise construction so callers don't need to know which formatter and
//! options each journal mode wants.

use super::Logger;
use crate::fmt::{HandlerOptions, ReplaceAttr};
use crate::handler::{JournalHandler, Mode};
use crate::internal;
use crate::journal::Journal;
use crate::level::Level;
use crate::record::Attr;
use std::sync::Arc;

/// Collects the settings for one journal destination.
#[derive(Default)]
pub struct LoggerBuilder {
    pub(super) min_level: Level,
    pub(super) mode: Mode,
    pub(super) identifier: Option<String>,
    pub(super) replace_attr: Option<ReplaceAttr>,
    pub(super) journal: Option<Arc<dyn Journal>>,
}

impl LoggerBuilder {
    /// Info threshold, JSON messages, system journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub const fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Full JSON record in the journal message.
    #[must_use]
    pub const fn json(self) -> Self {
        self.mode(Mode::Structured)
    }

    /// Bare message text in the journal message.
    #[must_use]
    pub const fn raw(self) -> Self {
        self.mode(Mode::Raw)
    }

    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Attribute rewrite hook for JSON mode. Raw mode always uses its own hook
    /// and ignores this one.
    #[must_use]
    pub fn replace_attr(
        mut self,
        hook: impl Fn(&[String], Attr) -> Attr + Send + Sync + 'static,
    ) -> Self {
        self.replace_attr = Some(Arc::new(hook));
        self
    }

    /// Where entries go. Defaults to the system journal on Linux.
    #[must_use]
    pub fn journal(mut self, journal: Arc<dyn Journal>) -> Self {
        self.journal = Some(journal);
        self
    }

    /// # Errors
    /// [`crate::Error::NoJournal`] when no journal was given and the platform has none.
    pub fn build_handler(self) -> Result<JournalHandler, crate::Error> {
        let journal = match self.journal {
            Some(journal) => journal,
            None => default_journal()?,
        };

        let handler = match self.mode {
            Mode::Structured => {
                let options = HandlerOptions {
                    level: self.min_level,
                    replace_attr: self.replace_attr,
                };
                JournalHandler::json(journal, options)
            }
            Mode::Raw => {
                if self.replace_attr.is_some() {
                    internal::warn("LOGGER", "replace_attr is ignored in raw mode");
                }
                JournalHandler::raw(journal, self.min_level)
            }
        };

        Ok(match self.identifier {
            Some(identifier) => handler.with_identifier(identifier),
            None => handler,
        })
    }

    /// # Errors
    /// See [`LoggerBuilder::build_handler`].
    pub fn build(self) -> Result<Logger, crate::Error> {
        Ok(Logger::new(Arc::new(self.build_handler()?)))
    }
}

#[cfg(target_os = "linux")]
#[allow(clippy::unnecessary_wraps)]
fn default_journal() -> Result<Arc<dyn Journal>, crate::Error> {
    use crate::journal::SystemJournal;

    if !SystemJournal::available() {
        internal::warn("LOGGER", "journald socket not found, entries will fail to send");
    }
    Ok(Arc::new(SystemJournal::new()))
}

#[cfg(not(target_os = "linux"))]
fn default_journal() -> Result<Arc<dyn Journal>, crate::Error> {
    Err(crate::Error::NoJournal)
}
