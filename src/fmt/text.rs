//! logfmt-style `key=value` lines.
//!
//! The message goes last and is never quoted, so a line reads as
//! `time=.. level=info user=bob msg=hello world`. An empty key is written as `""`.

use super::{Formatter, HandlerOptions, Scope, format_time};
use crate::level::Level;
use crate::record::{Attr, Record, Value};

use std::fmt::Write as _;
use std::io::{self, Write};

/// Serializes records as space-separated `key=value` pairs.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    scope: Scope,
}

impl TextFormatter {
    #[must_use]
    pub fn new(options: HandlerOptions) -> Self {
        Self {
            scope: Scope::new(options),
        }
    }

    fn line(&self, record: &Record) -> String {
        let mut line = String::new();
        let head = [self.scope.time(record), self.scope.level(record)];
        for attr in head.iter().flatten() {
            push_attr(&mut line, "", attr);
        }
        for attr in &self.scope.attrs(record) {
            push_attr(&mut line, "", attr);
        }
        if let Some(msg) = self.scope.message(record) {
            if !line.is_empty() {
                line.push(' ');
            }
            push_quoted(&mut line, &msg.key);
            line.push('=');
            let _ = write!(line, "{}", msg.value);
        }
        line
    }
}

fn push_attr(line: &mut String, prefix: &str, attr: &Attr) {
    if let Value::Group(members) = &attr.value {
        let prefix = if attr.key.is_empty() {
            prefix.to_string()
        } else {
            format!("{prefix}{}.", attr.key)
        };
        for member in members {
            push_attr(line, &prefix, member);
        }
        return;
    }

    if !line.is_empty() {
        line.push(' ');
    }
    push_quoted(line, &format!("{prefix}{}", attr.key));
    line.push('=');
    match &attr.value {
        Value::Time(t) => line.push_str(&format_time(t)),
        Value::Str(s) => push_quoted(line, s),
        other => push_quoted(line, &other.to_string()),
    }
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s.chars()
            .any(|c| c == ' ' || c == '=' || c == '"' || c.is_control())
}

fn push_quoted(line: &mut String, s: &str) {
    if !needs_quoting(s) {
        line.push_str(s);
        return;
    }
    line.push('"');
    for c in s.chars() {
        match c {
            '"' => line.push_str("\\\""),
            '\\' => line.push_str("\\\\"),
            '\n' => line.push_str("\\n"),
            '\r' => line.push_str("\\r"),
            '\t' => line.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(line, "\\u{{{:x}}}", u32::from(c));
            }
            c => line.push(c),
        }
    }
    line.push('"');
}

impl Formatter for TextFormatter {
    fn enabled(&self, level: Level) -> bool {
        self.scope.enabled(level)
    }

    fn format(&self, record: &Record, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(self.line(record).as_bytes())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Box<dyn Formatter> {
        Box::new(Self {
            scope: self.scope.with_attrs(attrs),
        })
    }

    fn with_group(&self, name: &str) -> Box<dyn Formatter> {
        Box::new(Self {
            scope: self.scope.with_group(name),
        })
    }
}
