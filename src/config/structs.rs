//! Configuration struct definitions.

use serde::Deserialize;

/// Settings that apply regardless of journal mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Minimum level handed to the journal.
    pub level: String,
    /// Threshold for journalog's own stderr diagnostics.
    pub internal_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            internal_level: "warn".to_string(),
        }
    }
}

/// Journal destination settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// `json` or `raw`.
    pub mode: String,
    /// `SYSLOG_IDENTIFIER` for every entry.
    pub identifier: Option<String>,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            mode: "json".to_string(),
            identifier: None,
        }
    }
}
