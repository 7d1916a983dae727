//! TOML configuration for building journal loggers without code changes.
//!
//! Separated from struct definitions so that the loading logic stays independent
//! of the serde schema.

mod structs;

pub use structs::{GeneralConfig, JournalConfig};

use crate::handler::Mode;
use crate::internal;
use crate::level::Level;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

/// A completely empty config file must still produce a working logger, so every
/// field carries `#[serde(default)]`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub journal: JournalConfig,
}

impl Config {
    /// Reads `<config dir>/journalog/config.toml`. A missing file yields defaults.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined, the file can't be read,
    /// or it isn't valid TOML.
    pub fn load() -> Result<Self, crate::Error> {
        internal::debug("CONFIG", "Loading config from default location");
        let path = Self::config_path()?;
        let config = Self::load_from(&path)?;
        internal::info("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// Loads from an explicit path; a leading `~` is expanded.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        let path = resolve_path(path);
        if !path.exists() {
            internal::debug(
                "CONFIG",
                &format!("{} not found, using defaults", path.display()),
            );
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    /// # Errors
    /// Returns error if `content` isn't valid TOML for this schema.
    pub fn from_toml(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// Platform config location, e.g. `~/.config/journalog/config.toml` on Linux.
    ///
    /// # Errors
    /// [`crate::Error::ConfigDirNotFound`] when no home directory can be determined.
    pub fn config_path() -> Result<PathBuf, crate::Error> {
        directories::ProjectDirs::from("", "", "journalog")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Lenient: an unknown level string falls back to Info.
    #[must_use]
    pub fn parse_level(&self) -> Level {
        self.try_level().unwrap_or_else(|e| {
            internal::warn("CONFIG", &format!("{e}, falling back to info"));
            Level::Info
        })
    }

    /// # Errors
    /// [`crate::Error::InvalidLevel`] for an unknown level string.
    pub fn try_level(&self) -> Result<Level, crate::Error> {
        self.general
            .level
            .parse()
            .map_err(|_| crate::Error::InvalidLevel(self.general.level.clone()))
    }

    #[must_use]
    pub fn parse_internal_level(&self) -> Level {
        self.general.internal_level.parse().unwrap_or(Level::Warn)
    }

    /// # Errors
    /// [`crate::Error::InvalidMode`] for anything but `json` / `raw`.
    pub fn parse_mode(&self) -> Result<Mode, crate::Error> {
        self.journal.mode.parse()
    }
}

/// Config values use `~` for portability; the OS needs an absolute path.
fn resolve_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.as_ref())
}
