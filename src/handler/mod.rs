//! The surface applications log through: check a level, hand over a record,
//! derive handlers carrying extra attributes or groups.

mod journal;

pub use journal::{JournalHandler, JournalWriter, Mode, RAW_FRAME_LEN, raw_replace_attr};

use crate::level::Level;
use crate::record::{Attr, Record};
use std::sync::Arc;

/// A log destination. `Send + Sync` so one handler can serve every thread.
pub trait Handler: Send + Sync {
    /// Whether records at `level` would be emitted at all. Must stay cheap:
    /// callers use it to skip building records.
    fn enabled(&self, level: Level) -> bool;

    /// Emits one record.
    ///
    /// # Errors
    /// Any failure of the underlying destination, unchanged.
    fn handle(&self, record: &Record) -> Result<(), crate::Error>;

    /// A handler that adds `attrs` to every record.
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    /// A handler that nests every later attribute under `name`.
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}
