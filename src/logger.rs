//! Custom logging module.
//!
//! This module provides a custom logger implementation that captures log entries
//! and forwards them over a channel to the UI thread for display in the log panel.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{mpsc, Mutex};

/// Records from dependencies are only shown at this level or above.
///
const DEPENDENCY_LEVEL: Level = Level::Warn;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {:<5} {}", timestamp, level_str, record.args())
}

/// Custom logger that forwards formatted entries to the UI
///
pub struct CustomLogger {
    level: LevelFilter,
    sender: Mutex<mpsc::Sender<String>>,
}

impl CustomLogger {
    pub fn new(level: LevelFilter, sender: mpsc::Sender<String>) -> Self {
        CustomLogger {
            level,
            sender: Mutex::new(sender),
        }
    }

    /// Install a logger as the global logger. Returns the receiving end of
    /// the formatted entries.
    ///
    pub fn install(level: LevelFilter) -> Result<mpsc::Receiver<String>, AppError> {
        let (tx, rx) = mpsc::channel();
        log::set_boxed_logger(Box::new(CustomLogger::new(level, tx)))
            .map_err(|e| AppError::Logger(e.to_string()))?;
        log::set_max_level(level);
        Ok(rx)
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        metadata.target().starts_with(env!("CARGO_CRATE_NAME")) || metadata.level() <= DEPENDENCY_LEVEL
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(sender) = self.sender.lock() {
                // The receiver is gone once the UI has shut down
                let _ = sender.send(format_log(record));
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record<'a>(level: Level, target: &'a str, args: std::fmt::Arguments<'a>) -> Record<'a> {
        Record::builder().level(level).target(target).args(args).build()
    }

    #[test]
    fn format_includes_level_and_message() {
        let line = format_log(&record(
            Level::Warn,
            "qualitygate_tui::sonar",
            format_args!("gate {} missing", 7),
        ));
        assert!(line.contains("WARN"));
        assert!(line.ends_with("gate 7 missing"));
    }

    #[test]
    fn forwards_enabled_records() {
        let (tx, rx) = mpsc::channel();
        let logger = CustomLogger::new(LevelFilter::Info, tx);

        logger.log(&record(
            Level::Info,
            "qualitygate_tui::app",
            format_args!("started"),
        ));
        logger.log(&record(
            Level::Debug,
            "qualitygate_tui::app",
            format_args!("too verbose"),
        ));
        logger.log(&record(Level::Info, "hyper::proto", format_args!("noise")));
        logger.log(&record(Level::Error, "hyper::proto", format_args!("broken")));

        let entries: Vec<String> = rx.try_iter().collect();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].ends_with("started"));
        assert!(entries[1].ends_with("broken"));
    }
}
