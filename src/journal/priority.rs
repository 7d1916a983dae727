//! Journal priorities and the level-to-priority mapping.

use crate::level::Level;
use std::fmt;

/// The syslog severity vocabulary journald stores in its `PRIORITY` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    #[default]
    Info = 6,
    Debug = 7,
}

impl Priority {
    /// Numeric value as written to the journal's `PRIORITY` field.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Emergency => "emerg",
            Self::Alert => "alert",
            Self::Critical => "crit",
            Self::Error => "err",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps an application level onto the journal's vocabulary.
///
/// Total: levels without an explicit journal counterpart (`Trace`, `Critical`)
/// land on `Info` rather than failing.
#[must_use]
pub const fn priority_for(level: Level) -> Priority {
    match level {
        Level::Debug => Priority::Debug,
        Level::Info => Priority::Info,
        Level::Warn => Priority::Warning,
        Level::Error => Priority::Error,
        // Trace and Critical have no journal counterpart here and log at Info.
        _ => Priority::Info,
    }
}

impl From<Level> for Priority {
    fn from(level: Level) -> Self {
        priority_for(level)
    }
}

#[cfg(target_os = "linux")]
impl From<Priority> for libsystemd::logging::Priority {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Emergency => Self::Emergency,
            Priority::Alert => Self::Alert,
            Priority::Critical => Self::Critical,
            Priority::Error => Self::Error,
            Priority::Warning => Self::Warning,
            Priority::Notice => Self::Notice,
            Priority::Info => Self::Info,
            Priority::Debug => Self::Debug,
        }
    }
}
