//! FILENAME: core/report-engine/src/logging.rs
// PURPOSE: Category-tagged log lines routed through the `log` facade.
// CONTEXT: Lines carry a process-wide sequence number so interleaved output
// from concurrent callers can be re-ordered afterwards. The crate never
// installs a logger; the host application decides where lines go.

use std::sync::atomic::{AtomicU64, Ordering};

/// Target used for every line emitted by this crate.
pub const LOG_TARGET: &str = "report_engine";

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Write a log line in `seq|category|message` format
pub fn write_log(level: log::Level, category: &str, message: &str) {
    if !log::log_enabled!(target: LOG_TARGET, level) {
        return;
    }
    let seq = next_seq();
    log::log!(target: LOG_TARGET, level, "{}|{}|{}", seq, category, message);
}

/// Write an ENTER line for function entry
pub fn write_log_enter(category: &str, func_name: &str, params: &str) {
    let message = if params.is_empty() {
        format!("ENTER {}", func_name)
    } else {
        format!("ENTER {} {}", func_name, params)
    };
    write_log(log::Level::Debug, category, &message);
}

/// Write an EXIT line for function exit
pub fn write_log_exit(category: &str, func_name: &str, result: &str) {
    let message = if result.is_empty() {
        format!("EXIT {}", func_name)
    } else {
        format!("EXIT {} {}", func_name, result)
    };
    write_log(log::Level::Debug, category, &message);
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log(::log::Level::Debug, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log(::log::Level::Warn, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_enter($cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_enter($cat, $func, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_exit($cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_exit($cat, $func, &format!($($arg)*))
    };
}

pub use log_debug;
pub use log_warn;
pub use log_enter;
pub use log_exit;
