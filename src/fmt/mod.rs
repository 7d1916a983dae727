//! Record serialization. A formatter turns one `Record` into bytes and writes them
//! into whatever `io::Write` sink it is handed; it never learns where the bytes go.

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::level::Level;
use crate::record::{Attr, LEVEL_KEY, MESSAGE_KEY, Record, TIME_KEY, Value};
use chrono::{DateTime, Local, SecondsFormat};
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Rewrites or drops attributes just before they are serialized. Receives the
/// group path the attribute sits in (empty for the built-in `time`, `level`, `msg`).
/// Returning [`Attr::empty`] removes the attribute.
///
/// Top-level attributes whose key collides with a built-in arrive already renamed
/// to `fields.<key>`, so a hook keyed on `msg` at the root only ever sees the
/// record's own message.
pub type ReplaceAttr = Arc<dyn Fn(&[String], Attr) -> Attr + Send + Sync>;

/// Prefix given to top-level attributes that would otherwise shadow `time`,
/// `level` or `msg`.
pub const SHADOWED_PREFIX: &str = "fields.";

fn is_builtin_key(key: &str) -> bool {
    matches!(key, TIME_KEY | LEVEL_KEY | MESSAGE_KEY)
}

/// Knobs shared by both formatters.
#[derive(Clone, Default)]
pub struct HandlerOptions {
    /// Records below this level are reported as disabled and never formatted.
    pub level: Level,
    pub replace_attr: Option<ReplaceAttr>,
}

impl HandlerOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn replace_attr(
        mut self,
        hook: impl Fn(&[String], Attr) -> Attr + Send + Sync + 'static,
    ) -> Self {
        self.replace_attr = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for HandlerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerOptions")
            .field("level", &self.level)
            .field("replace_attr", &self.replace_attr.is_some())
            .finish()
    }
}

/// A structured-record serializer that writes into a caller-supplied sink.
pub trait Formatter: Send + Sync {
    /// Threshold check, cheap enough to call before building a record.
    fn enabled(&self, level: Level) -> bool;

    /// Serializes `record` and writes it to `out` in a single `write_all`.
    ///
    /// # Errors
    /// Whatever `out` reports; the error is passed through untouched.
    fn format(&self, record: &Record, out: &mut dyn Write) -> io::Result<()>;

    /// A formatter that also emits `attrs` with every record.
    fn with_attrs(&self, attrs: Vec<Attr>) -> Box<dyn Formatter>;

    /// A formatter that nests all later attributes under `name`.
    fn with_group(&self, name: &str) -> Box<dyn Formatter>;
}

/// One level of grouping. The root frame has an empty name.
#[derive(Debug, Clone, Default)]
struct Frame {
    group: String,
    attrs: Vec<Attr>,
}

/// Options plus the attributes and groups accumulated through `with_attrs` /
/// `with_group`. Both formatters keep one of these.
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    options: HandlerOptions,
    frames: Vec<Frame>,
}

impl Scope {
    pub(crate) fn new(options: HandlerOptions) -> Self {
        Self {
            options,
            frames: vec![Frame::default()],
        }
    }

    pub(crate) fn enabled(&self, level: Level) -> bool {
        level >= self.options.level
    }

    pub(crate) fn with_attrs(&self, attrs: Vec<Attr>) -> Self {
        let mut scope = self.clone();
        if let Some(frame) = scope.frames.last_mut() {
            frame.attrs.extend(attrs);
        }
        scope
    }

    pub(crate) fn with_group(&self, name: &str) -> Self {
        let mut scope = self.clone();
        if !name.is_empty() {
            scope.frames.push(Frame {
                group: name.to_string(),
                attrs: Vec::new(),
            });
        }
        scope
    }

    /// Runs a built-in field through the replace hook.
    pub(crate) fn builtin(&self, key: &str, value: Value) -> Option<Attr> {
        self.replace(&[], Attr::new(key, value))
    }

    pub(crate) fn time(&self, record: &Record) -> Option<Attr> {
        self.builtin(TIME_KEY, Value::Time(record.time))
    }

    pub(crate) fn level(&self, record: &Record) -> Option<Attr> {
        self.builtin(LEVEL_KEY, Value::Str(record.level.as_str().to_string()))
    }

    pub(crate) fn message(&self, record: &Record) -> Option<Attr> {
        self.builtin(MESSAGE_KEY, Value::Str(record.message.clone()))
    }

    /// The accumulated attributes with the record's own attributes placed in the
    /// innermost group, replace hook applied and empty entries removed.
    pub(crate) fn attrs(&self, record: &Record) -> Vec<Attr> {
        let mut inner = record.attrs.clone();
        for frame in self.frames.iter().rev() {
            let mut attrs = frame.attrs.clone();
            if frame.group.is_empty() {
                attrs.extend(inner);
            } else {
                attrs.push(Attr::group(frame.group.clone(), inner));
            }
            inner = attrs;
        }

        let mut path = Vec::new();
        inner
            .iter()
            .filter_map(|attr| self.resolve(&mut path, attr))
            .collect()
    }

    fn resolve(&self, path: &mut Vec<String>, attr: &Attr) -> Option<Attr> {
        let key = if path.is_empty() && is_builtin_key(&attr.key) {
            format!("{SHADOWED_PREFIX}{}", attr.key)
        } else {
            attr.key.clone()
        };

        if let Value::Group(members) = &attr.value {
            let named = !key.is_empty();
            if named {
                path.push(key.clone());
            }
            let members: Vec<Attr> = members
                .iter()
                .filter_map(|member| self.resolve(path, member))
                .collect();
            if named {
                path.pop();
            }
            return (!members.is_empty()).then(|| Attr::group(key, members));
        }

        self.replace(path, Attr::new(key, attr.value.clone()))
    }

    fn replace(&self, path: &[String], attr: Attr) -> Option<Attr> {
        let attr = match &self.options.replace_attr {
            Some(hook) => hook(path, attr),
            None => attr,
        };
        (!attr.is_empty()).then_some(attr)
    }
}

pub(crate) fn format_time(time: &DateTime<Local>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, false)
}
