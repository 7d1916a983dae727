//! One JSON object per record. journald stores it verbatim in `MESSAGE`, so
//! `journalctl -o cat | jq` gets the full structure back.

use super::{Formatter, HandlerOptions, Scope, format_time};
use crate::level::Level;
use crate::record::{Attr, Record, Value};

use serde_json::{Map, Value as JsonValue};
use std::io::{self, Write};

/// Serializes records as `{"time":..,"level":..,"msg":..,<attrs>}`.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    scope: Scope,
}

impl JsonFormatter {
    #[must_use]
    pub fn new(options: HandlerOptions) -> Self {
        Self {
            scope: Scope::new(options),
        }
    }

    fn object(&self, record: &Record) -> Map<String, JsonValue> {
        let mut map = Map::new();
        let builtins = [
            self.scope.time(record),
            self.scope.level(record),
            self.scope.message(record),
        ];
        for attr in builtins.into_iter().flatten() {
            insert(&mut map, attr);
        }
        for attr in self.scope.attrs(record) {
            insert(&mut map, attr);
        }
        map
    }
}

/// Groups become nested objects; a group without a key splices its members into the parent.
fn insert(map: &mut Map<String, JsonValue>, attr: Attr) {
    match attr.value {
        Value::Group(members) if attr.key.is_empty() => {
            for member in members {
                insert(map, member);
            }
        }
        Value::Group(members) => {
            let mut nested = Map::new();
            for member in members {
                insert(&mut nested, member);
            }
            map.insert(attr.key, JsonValue::Object(nested));
        }
        value => {
            map.insert(attr.key, to_json(value));
        }
    }
}

fn to_json(value: Value) -> JsonValue {
    match value {
        Value::Empty => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(b),
        Value::I64(n) => JsonValue::from(n),
        Value::U64(n) => JsonValue::from(n),
        // NaN and infinities have no JSON form and become null
        Value::F64(n) => JsonValue::from(n),
        Value::Str(s) => JsonValue::String(s),
        Value::Time(t) => JsonValue::String(format_time(&t)),
        Value::Group(members) => {
            let mut nested = Map::new();
            for member in members {
                insert(&mut nested, member);
            }
            JsonValue::Object(nested)
        }
    }
}

impl Formatter for JsonFormatter {
    fn enabled(&self, level: Level) -> bool {
        self.scope.enabled(level)
    }

    fn format(&self, record: &Record, out: &mut dyn Write) -> io::Result<()> {
        let bytes = serde_json::to_vec(&JsonValue::Object(self.object(record)))
            .map_err(io::Error::other)?;
        out.write_all(&bytes)
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
