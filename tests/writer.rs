//! Tests for the journal byte sink.

use journalog::handler::RAW_FRAME_LEN;
use journalog::{Journal, JournalWriter, MemoryJournal, Mode, Priority, WriteError};
use std::io::{self, Write};
use std::sync::Arc;

struct UnavailableJournal;

impl Journal for UnavailableJournal {
    fn send(&self, _: &str, _: Priority, _: &[(String, String)]) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::NotFound, "journal socket missing"))
    }
}

#[test]
fn raw_write_strips_frame() {
    let journal = MemoryJournal::new();
    let mut writer = JournalWriter::new(Arc::new(journal.clone()), Mode::Raw);
    writer.set_priority(Priority::Warning);

    let written = writer.write(b"xyzhello").unwrap();

    assert_eq!(written, 8);
    let entries = journal.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "hello");
    assert_eq!(entries[0].priority, Priority::Warning);
}

#[test]
fn raw_write_shorter_than_frame_sends_empty_message() {
    let journal = MemoryJournal::new();
    let mut writer = JournalWriter::new(Arc::new(journal.clone()), Mode::Raw);

    assert_eq!(writer.write(b"ab").unwrap(), 2);
    assert_eq!(journal.entries()[0].message, "");
    assert_eq!(RAW_FRAME_LEN, 3);
}

#[test]
fn structured_write_is_verbatim() {
    let journal = MemoryJournal::new();
    let mut writer = JournalWriter::new(Arc::new(journal.clone()), Mode::Structured);
    writer.set_priority(Priority::Error);
    let payload = br#"{"time":"2025-01-15T14:30:00.000+00:00","level":"error","msg":"boom"}"#;

    let written = writer.write(payload).unwrap();

    assert_eq!(written, payload.len());
    let entries = journal.entries();
    assert_eq!(entries[0].message.as_bytes(), payload);
    assert_eq!(entries[0].priority, Priority::Error);
}

#[test]
fn each_write_is_one_entry() {
    let journal = MemoryJournal::new();
    let mut writer = JournalWriter::new(Arc::new(journal.clone()), Mode::Structured);

    writer.write_all(b"one").unwrap();
    writer.write_all(b"two").unwrap();

    let messages: Vec<String> = journal.drain().into_iter().map(|e| e.message).collect();
    assert_eq!(messages, ["one", "two"]);
    assert!(journal.is_empty());
}

#[test]
fn failed_send_reports_payload_and_cause() {
    let mut writer = JournalWriter::new(Arc::new(UnavailableJournal), Mode::Raw);

    let err = writer.write(b"\"\"=disk full").unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::Other);
    let write_err = err
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<WriteError>())
        .expect("io::Error should carry a WriteError");
    assert_eq!(write_err.payload(), "disk full");
    assert_eq!(write_err.cause().kind(), io::ErrorKind::NotFound);
    assert!(write_err.to_string().contains("journal socket missing"));
}

#[test]
fn extra_fields_are_sent_with_every_entry() {
    let journal = MemoryJournal::new();
    let mut writer = JournalWriter::new(Arc::new(journal.clone()), Mode::Structured);
    writer.add_field("SYSLOG_IDENTIFIER", "myapp");

    writer.write_all(b"{}").unwrap();

    assert_eq!(
        journal.entries()[0].fields,
        vec![("SYSLOG_IDENTIFIER".to_string(), "myapp".to_string())]
    );
    assert_eq!(writer.fields().len(), 1);
}

#[test]
fn non_utf8_bytes_are_replaced() {
    let journal = MemoryJournal::new();
    let mut writer = JournalWriter::new(Arc::new(journal.clone()), Mode::Structured);

    writer.write_all(&[b'o', b'k', 0xff]).unwrap();

    assert_eq!(journal.entries()[0].message, "ok\u{fffd}");
}

#[test]
fn writer_starts_at_info() {
    let writer = JournalWriter::new(Arc::new(MemoryJournal::new()), Mode::Raw);
    assert_eq!(writer.priority(), Priority::Info);
    assert_eq!(writer.mode(), Mode::Raw);
}
