use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

// Logger with per-topic filtering of debug/trace output
#[derive(Debug)]
struct ArenaLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl log::Log for ArenaLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Debug and trace records must match a requested topic
        match &self.debug_filters {
            Some(filters) if metadata.level() >= log::Level::Debug => {
                filters.contains(metadata.target())
                    || filters.iter().any(|f| metadata.target().starts_with(f.as_str()))
            }
            _ => true,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let message = record.args().to_string();
        let context = bot_context(&message)
            .map(|id| format!("[B{:02}] ", id))
            .unwrap_or_default();

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {context}{target}: {message}",
            level = record.level(),
            target = record.target(),
        );
        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }

        let mut stdout = io::stdout().lock();
        // Nowhere to report a broken stdout
        let _ = writeln!(stdout, "{}", output);
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

// Extracts N from a "Bot N" mention in a log message
fn bot_context(message: &str) -> Option<u32> {
    let start = message.find("Bot ")? + 4;
    let digits: String = message[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

static LOGGER: OnceLock<ArenaLogger> = OnceLock::new();

/// Installs the arena logger.
///
/// `debug_filter` is a comma-separated topic list (`move,shot,bot,spawn,ray`);
/// when present, debug and trace records outside those topics are dropped.
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let debug_filters = debug_filter.map(|filter_str| {
        filter_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<String>>()
    });

    let logger = LOGGER.get_or_init(|| ArenaLogger {
        level,
        debug_filters,
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

/// Parses a `--log-level` value, defaulting to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    match name.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

// Topic macros
#[macro_export]
macro_rules! debug_move {
    ($($arg:tt)*) => {
        log::debug!(target: "move", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_shot {
    ($($arg:tt)*) => {
        log::debug!(target: "shot", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_bot {
    ($($arg:tt)*) => {
        log::debug!(target: "bot", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_spawn {
    ($($arg:tt)*) => {
        log::debug!(target: "spawn", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_ray {
    ($($arg:tt)*) => {
        log::trace!(target: "ray", "{}", format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_context() {
        assert_eq!(bot_context("Bot 3 fired"), Some(3));
        assert_eq!(bot_context("Player hit Bot 12 at (1, 2)"), Some(12));
        assert_eq!(bot_context("Player moved"), None);
        assert_eq!(bot_context("Bot x"), None);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("nonsense"), LevelFilter::Info);
    }

    #[test]
    fn test_topic_filtering() {
        use log::Log;
        let logger = ArenaLogger {
            level: LevelFilter::Debug,
            debug_filters: Some(["shot".to_string()].into_iter().collect()),
        };
        let debug_shot = Metadata::builder().level(log::Level::Debug).target("shot").build();
        let debug_move = Metadata::builder().level(log::Level::Debug).target("move").build();
        let info_move = Metadata::builder().level(log::Level::Info).target("move").build();
        let trace_shot = Metadata::builder().level(log::Level::Trace).target("shot").build();
        assert!(logger.enabled(&debug_shot));
        assert!(!logger.enabled(&debug_move));
        assert!(logger.enabled(&info_move));
        assert!(!logger.enabled(&trace_shot));
    }
}
