//! linelog's own diagnostics (rotation, pruning, config loading) need somewhere to go.
//! The host decides where by installing a logger once; until then they are dropped.
//!
//! Uses `OnceLock` so the logger is installed exactly once, even if several entry
//! points race to call `init`. Nothing here creates a terminal writer of its own:
//! a host that wants diagnostics on the console passes a logger built on its
//! existing [`ConsoleWriter`](crate::output::ConsoleWriter).

use crate::level::Level;
use crate::logger::Logger;
use std::cell::{Cell, RefCell};
use std::sync::OnceLock;

static INTERNAL_LOGGER: OnceLock<Logger> = OnceLock::new();

thread_local! {
    /// Set while this thread is inside an output's `write`, where the output may hold
    /// its own lock. Logging from there could re-enter that lock.
    static IN_OUTPUT: Cell<bool> = const { Cell::new(false) };
    static DEFERRED: RefCell<Vec<(Level, String, String)>> = const { RefCell::new(Vec::new()) };
}

/// Installs the diagnostics logger. Returns `false` if one was already installed,
/// in which case `logger` is dropped.
pub fn init(logger: Logger) -> bool {
    let installed = INTERNAL_LOGGER.set(logger).is_ok();
    if installed {
        debug("INTERNAL", "Internal logger ready");
    }
    installed
}

#[must_use]
pub fn is_initialized() -> bool {
    INTERNAL_LOGGER.get().is_some()
}

/// Marks this thread as dispatching to outputs. Returns the previous state for [`leave_output`].
pub(crate) fn enter_output() -> bool {
    IN_OUTPUT.replace(true)
}

/// Restores the state and, once the outermost dispatch is done, emits what was held back.
pub(crate) fn leave_output(was_inside: bool) {
    IN_OUTPUT.set(was_inside);
    if was_inside {
        return;
    }
    let deferred = DEFERRED.with_borrow_mut(std::mem::take);
    for (level, scope, msg) in deferred {
        log(level, &scope, &msg);
    }
}

/// Pre-init calls silently vanish rather than crashing, so diagnostics are safe during early startup.
fn log(level: Level, scope: &str, msg: &str) {
    let Some(logger) = INTERNAL_LOGGER.get() else {
        return;
    };
    if IN_OUTPUT.get() {
        DEFERRED.with_borrow_mut(|d| d.push((level, scope.to_string(), msg.to_string())));
    } else {
        logger.log(level, scope, msg);
    }
}

/// High-volume instrumentation (every file open).
pub fn trace(scope: &str, msg: &str) {
    log(Level::Trace, scope, msg);
}

/// Startup and rotation details.
pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

/// Normal operational milestones: config loaded.
pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

/// Non-fatal anomalies: an output skipped, a backup that would not compress.
pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}

/// Failures the host should know about.
pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
