//! Unified error type for all journalog operations.

use std::fmt;
use std::io;

/// A journal send that failed. Keeps the text that was being sent so the caller
/// can still route the message somewhere else.
#[derive(Debug)]
pub struct WriteError {
    payload: String,
    source: io::Error,
}

impl WriteError {
    #[must_use]
    pub const fn new(payload: String, source: io::Error) -> Self {
        Self { payload, source }
    }

    /// The exact message text that did not reach the journal.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Consumes the error, handing back the unsent text.
    #[must_use]
    pub fn into_payload(self) -> String {
        self.payload
    }

    #[must_use]
    pub const fn cause(&self) -> &io::Error {
        &self.source
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to write to journal: {}", self.source)
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Error type for journalog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error outside the journal send itself (formatter output, config file reads).
    Io(io::Error),
    /// The journal rejected an entry.
    Write(WriteError),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// Invalid log level string.
    InvalidLevel(String),
    /// Invalid output mode string.
    InvalidMode(String),
    /// No journal was supplied and the platform has no system journal.
    NoJournal,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Write(e) => e.fmt(f),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::InvalidLevel(level) => write!(f, "invalid level: {level}"),
            Self::InvalidMode(mode) => write!(f, "invalid journal mode: {mode}"),
            Self::NoJournal => write!(f, "no journal available on this platform"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Write(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            Self::ConfigDirNotFound
            | Self::InvalidLevel(_)
            | Self::InvalidMode(_)
            | Self::NoJournal => None,
        }
    }
}

/// A `WriteError` raised by the journal sink travels through the formatter inside an
/// `io::Error`; this unwraps it again so callers see the original value.
impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        if !e.get_ref().is_some_and(|inner| inner.is::<WriteError>()) {
            return Self::Io(e);
        }
        let kind = e.kind();
        match e.into_inner().map(|inner| inner.downcast::<WriteError>()) {
            Some(Ok(write)) => Self::Write(*write),
            Some(Err(other)) => Self::Io(io::Error::new(kind, other)),
            None => Self::Io(io::Error::from(kind)),
        }
    }
}

impl From<WriteError> for Error {
    fn from(e: WriteError) -> Self {
        Self::Write(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
