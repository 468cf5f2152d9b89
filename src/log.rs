//! File logging for taskrank.
//!
//! Levels, most to least severe:
//! - ERROR: the command could not complete
//! - WARN: recoverable surprises (cycles, dangling dependency ids, unknown strategies)
//! - INFO: one line per command
//! - DEBUG: batch sizes, chosen strategy, final order
//! - TRACE: per-task scoring and placement
//!
//! Nothing is written until `init` or `init_at` has been called, so library
//! users and tests never touch the filesystem. Debug output is enabled with
//! `--debug` or `TASKRANK_DEBUG=1`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();
static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

const DEBUG_ENV: &str = "TASKRANK_DEBUG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            0 => LogLevel::Error,
            1 => LogLevel::Warn,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Whether `TASKRANK_DEBUG` asks for debug output.
fn debug_from_env() -> bool {
    std::env::var(DEBUG_ENV)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Initialize logging to `~/.taskrank/taskrank.log`.
///
/// A missing home directory leaves logging disabled rather than failing the
/// command.
pub fn init(debug: bool) {
    if let Some(dir) = dirs::home_dir().map(|h| h.join(".taskrank")) {
        init_at(&dir.join("taskrank.log"), debug);
    }
}

/// Initialize logging to an explicit file, truncating it.
pub fn init_at(path: &Path, debug: bool) {
    let level = if debug || debug_from_env() {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    set_level(level);

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = std::fs::write(path, "");
    LOG_PATH.set(path.to_path_buf()).ok();
}

pub fn set_level(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

pub fn level() -> LogLevel {
    LogLevel::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

pub fn enabled(level: LogLevel) -> bool {
    LOG_PATH.get().is_some() && level <= self::level()
}

pub fn log_at(level: LogLevel, msg: &str) {
    if !enabled(level) {
        return;
    }
    if let Some(path) = LOG_PATH.get() {
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
            let _ = writeln!(file, "[{}] [{}] {}", timestamp, level.as_str(), msg);
        }
    }
}

#[macro_export]
macro_rules! rlog {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! rlog_error {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Error, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! rlog_warn {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Warn, &format!($($arg)*))
    };
}

/// Skips formatting entirely unless debug output is on.
#[macro_export]
macro_rules! rlog_debug {
    ($($arg:tt)*) => {
        if $crate::log::enabled($crate::log::LogLevel::Debug) {
            $crate::log::log_at($crate::log::LogLevel::Debug, &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! rlog_trace {
    ($($arg:tt)*) => {
        if $crate::log::enabled($crate::log::LogLevel::Trace) {
            $crate::log::log_at($crate::log::LogLevel::Trace, &format!($($arg)*))
        }
    };
}
