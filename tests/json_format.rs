//! Tests for the JSON record formatter.

use chrono::{Local, TimeZone};
use journalog::record::TIME_KEY;
use journalog::{Attr, Formatter, HandlerOptions, JsonFormatter, Level, Record, Value};
use serde_json::json;
use std::io::{self, Write};

/// Counts `write` calls so tests can check a record arrives in one piece.
#[derive(Default)]
struct CountingSink {
    bytes: Vec<u8>,
    writes: usize,
}

impl Write for CountingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes += 1;
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn render(formatter: &dyn Formatter, record: &Record) -> serde_json::Value {
    let mut out = Vec::new();
    formatter.format(record, &mut out).unwrap();
    serde_json::from_slice(&out).unwrap()
}

fn fixed_record(level: Level, msg: &str) -> Record {
    let mut record = Record::new(level, msg);
    record.time = Local.with_ymd_and_hms(2025, 1, 15, 14, 30, 0).unwrap();
    record
}

#[test]
fn builtins_come_first_in_order() {
    let formatter = JsonFormatter::new(HandlerOptions::new());
    let json = render(&formatter, &fixed_record(Level::Warn, "hello").attr("k", "v"));

    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["time", "level", "msg", "k"]);
    assert_eq!(json["level"], "warn");
    assert_eq!(json["msg"], "hello");
    assert!(json["time"].as_str().unwrap().starts_with("2025-01-15T14:30:00.000"));
}

#[test]
fn attribute_types() {
    let formatter = JsonFormatter::new(HandlerOptions::new());
    let record = fixed_record(Level::Info, "types")
        .attr("flag", true)
        .attr("count", 3)
        .attr("big", u64::MAX)
        .attr("ratio", 0.5)
        .attr("name", "bob")
        .attr("nothing", Value::Empty);

    let json = render(&formatter, &record);

    assert_eq!(json["flag"], true);
    assert_eq!(json["count"], 3);
    assert_eq!(json["big"], u64::MAX);
    assert_eq!(json["ratio"], 0.5);
    assert_eq!(json["name"], "bob");
    assert!(json["nothing"].is_null());
}

#[test]
fn groups_nest_objects() {
    let formatter = JsonFormatter::new(HandlerOptions::new())
        .with_attrs(vec![Attr::new("service", "api")])
        .with_group("req")
        .with_attrs(vec![Attr::new("id", 7)]);

    let json = render(&*formatter, &fixed_record(Level::Info, "done").attr("status", 200));

    assert_eq!(json["service"], "api");
    assert_eq!(json["req"], json!({"id": 7, "status": 200}));
}

#[test]
fn empty_group_is_omitted() {
    let formatter = JsonFormatter::new(HandlerOptions::new()).with_group("req");
    let json = render(&*formatter, &fixed_record(Level::Info, "nothing attached"));
    assert!(json.get("req").is_none());
}

#[test]
fn inline_group_attr_without_key_splices_members() {
    let formatter = JsonFormatter::new(HandlerOptions::new());
    let record = fixed_record(Level::Info, "x").attrs([Attr::group(
        "",
        vec![Attr::new("a", 1), Attr::new("b", 2)],
    )]);
    let json = render(&formatter, &record);
    assert_eq!(json["a"], 1);
    assert_eq!(json["b"], 2);
}

#[test]
fn replace_attr_can_drop_and_rename() {
    let options = HandlerOptions::new().replace_attr(|groups, attr| {
        if attr.key == TIME_KEY {
            Attr::empty()
        } else if attr.key == "password" {
            Attr::new(attr.key, "***")
        } else if !groups.is_empty() && attr.key == "id" {
            Attr::new(format!("{}_id", groups.join("_")), attr.value)
        } else {
            attr
        }
    });
    let formatter = JsonFormatter::new(options).with_group("user");

    let json = render(
        &*formatter,
        &fixed_record(Level::Info, "login")
            .attr("password", "hunter2")
            .attr("id", 9),
    );

    assert!(json.get("time").is_none());
    assert_eq!(json["user"]["password"], "***");
    assert_eq!(json["user"]["user_id"], 9);
}

#[test]
fn enabled_follows_threshold() {
    let formatter = JsonFormatter::new(HandlerOptions::new().level(Level::Error));
    assert!(!formatter.enabled(Level::Warn));
    assert!(formatter.enabled(Level::Error));
    assert!(formatter.enabled(Level::Critical));
}

#[test]
fn record_is_written_once_without_newline() {
    let formatter = JsonFormatter::new(HandlerOptions::new());
    let mut sink = CountingSink::default();

    formatter
        .format(&fixed_record(Level::Info, "one write").attr("a", 1), &mut sink)
        .unwrap();

    assert_eq!(sink.writes, 1);
    assert_eq!(sink.bytes.last(), Some(&b'}'));
}

#[test]
fn colliding_keys_are_renamed_not_overwritten() {
    let formatter = JsonFormatter::new(HandlerOptions::new())
        .with_attrs(vec![Attr::new("time", "yesterday")]);
    let record = fixed_record(Level::Error, "real")
        .attr("msg", "shadow")
        .attr("level", "bogus");

    let json = render(formatter.as_ref(), &record);
    assert_eq!(json["msg"], "real");
    assert_eq!(json["level"], "error");
    assert!(json["time"].as_str().unwrap().starts_with("2025-01-15T14:30:00.000"));
    assert_eq!(json["fields.msg"], "shadow");
    assert_eq!(json["fields.level"], "bogus");
    assert_eq!(json["fields.time"], "yesterday");
}

#[test]
fn builtin_names_inside_groups_are_kept() {
    let formatter = JsonFormatter::new(HandlerOptions::new()).with_group("req");
    let record = fixed_record(Level::Info, "ok").attr("msg", "inner");
    let json = render(formatter.as_ref(), &record);
    assert_eq!(json["msg"], "ok");
    assert_eq!(json["req"]["msg"], "inner");
}

#[test]
fn group_named_msg_does_not_replace_message() {
    let formatter = JsonFormatter::new(HandlerOptions::new());
    let record =
        fixed_record(Level::Info, "ok").attr("msg", Value::Group(vec![Attr::new("a", 1)]));
    let json = render(&formatter, &record);
    assert_eq!(json["msg"], "ok");
    assert_eq!(json["fields.msg"]["a"], 1);
}
