//! journalog's own diagnostic output.
//!
//! Goes to stderr, never to the journal, so a broken journal connection can still
//! be reported. Uses `OnceLock` so the threshold is set exactly once, even if
//! several entry points race to call `init`. Nothing is printed before `init`.

use crate::config::Config;
use crate::level::Level;
use std::io::{self, Write};
use std::sync::OnceLock;

static INTERNAL_LEVEL: OnceLock<Level> = OnceLock::new();

/// Enables diagnostics at `level` and above. Only the first call takes effect.
pub fn init(level: Level) {
    let was_init = INTERNAL_LEVEL.get().is_some();
    INTERNAL_LEVEL.get_or_init(|| level);
    if !was_init {
        debug("INTERNAL", &format!("Diagnostics enabled at {level}"));
    }
}

/// Same as [`init`], with the threshold taken from `general.internal_level`.
pub fn init_with_config(config: &Config) {
    init(config.parse_internal_level());
}

/// Pre-init calls silently vanish rather than crashing, safe during early startup.
fn log(level: Level, scope: &str, msg: &str) {
    let Some(&min) = INTERNAL_LEVEL.get() else {
        return;
    };
    if level < min {
        return;
    }
    let tag = format!("[{}]", level.as_str().to_uppercase());
    let _ = writeln!(io::stderr(), "{tag:<10} {scope:<10}  {msg}");
}

pub fn trace(scope: &str, msg: &str) {
    log(Level::Trace, scope, msg);
}

pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}

pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
