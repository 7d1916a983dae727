//! journald over its native socket protocol, via libsystemd.

use super::{Journal, Priority};
use std::io;

/// The host's systemd journal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemJournal;

impl SystemJournal {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// True when journald's socket is reachable, i.e. sends have a chance of landing.
    #[must_use]
    pub fn available() -> bool {
        std::path::Path::new("/run/systemd/journal/socket").exists()
    }
}

impl Journal for SystemJournal {
    fn send(
        &self,
        message: &str,
        priority: Priority,
        fields: &[(String, String)],
    ) -> io::Result<()> {
        let vars = fields.iter().map(|(k, v)| (k.as_str(), v.as_str()));
        libsystemd::logging::journal_send(priority.into(), message, vars)
            .map_err(|e| io::Error::other(e.to_string()))
    }
}
