//! Category-tagged debug log for tab orchestration.
//!
//! Controlled by the `TERMTABS_DEBUG_LEVEL` environment variable:
//! - 0 or unset: off
//! - 1: errors
//! - 2: info (tab created, detached, attached)
//! - 3: debug (selection changes, batched notifications)
//! - 4: trace
//!
//! Output goes to `termtabs_debug.log` in the system temp directory so the
//! host application's stdout/stderr stay untouched. Regular `log` macros are
//! still used for messages the embedding application should see.

use parking_lot::Mutex;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u8>() {
            Ok(1) => DebugLevel::Error,
            Ok(2) => DebugLevel::Info,
            Ok(3) => DebugLevel::Debug,
            Ok(4) => DebugLevel::Trace,
            _ => DebugLevel::Off,
        }
    }

    fn label(self) -> &'static str {
        match self {
            DebugLevel::Off => "OFF  ",
            DebugLevel::Error => "ERROR",
            DebugLevel::Info => "INFO ",
            DebugLevel::Debug => "DEBUG",
            DebugLevel::Trace => "TRACE",
        }
    }
}

struct DebugLogger {
    level: DebugLevel,
    file: Option<File>,
}

impl DebugLogger {
    fn from_env() -> Self {
        let level = std::env::var("TERMTABS_DEBUG_LEVEL")
            .map(|v| DebugLevel::parse(&v))
            .unwrap_or(DebugLevel::Off);
        if level == DebugLevel::Off {
            return Self { level, file: None };
        }

        let path = std::env::temp_dir().join("termtabs_debug.log");
        // A log file that cannot be opened just disables output
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&path)
            .ok();

        let mut logger = Self { level, file };
        logger.write_line(&format!(
            "termtabs debug session started at {} (level={:?})",
            timestamp(),
            level
        ));
        logger
    }

    fn write_line(&mut self, line: &str) {
        if let Some(file) = self.file.as_mut() {
            let _ = writeln!(file, "{line}");
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

fn logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::from_env()))
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    level != DebugLevel::Off && level <= logger().lock().level
}

/// Log formatted message under a category
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if !is_enabled(level) {
        return;
    }
    let line = format!("[{}] [{}] [{}] {}", timestamp(), level.label(), category, args);
    logger().lock().write_line(&line);
}

#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Trace, $category, format_args!($($arg)*))
    };
}
