//! Logger construction from a loaded [`Config`].

use super::{Logger, LoggerBuilder};
use crate::config::Config;
use crate::internal;
use crate::journal::Journal;
use std::sync::Arc;

impl LoggerBuilder {
    /// A builder preloaded with level, mode and identifier from `config`.
    ///
    /// # Errors
    /// Fails on an unknown level or mode string.
    pub fn from_config(config: &Config) -> Result<Self, crate::Error> {
        let level = config.try_level()?;
        let mode = config.parse_mode()?;
        internal::debug(
            "LOGGER",
            &format!("From config: level={level}, mode={}", mode.as_str()),
        );

        let mut builder = Self::new().level(level).mode(mode);
        if let Some(identifier) = &config.journal.identifier {
            builder = builder.identifier(identifier.clone());
        }
        Ok(builder)
    }
}

impl Logger {
    /// Builds a logger for `journal` as described by `config`.
    ///
    /// # Errors
    /// Fails on an unknown level or mode string.
    pub fn from_config(config: &Config, journal: Arc<dyn Journal>) -> Result<Self, crate::Error> {
        LoggerBuilder::from_config(config)?.journal(journal).build()
    }

    /// Loads the default config file and builds a logger for the system journal.
    ///
    /// # Errors
    /// Config loading failures, unknown level or mode strings, or
    /// [`crate::Error::NoJournal`] off Linux.
    pub fn from_default_config() -> Result<Self, crate::Error> {
        let config = Config::load()?;
        internal::init_with_config(&config);
        LoggerBuilder::from_config(&config)?.build()
    }
}
