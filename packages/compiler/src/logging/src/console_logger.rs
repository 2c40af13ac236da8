// Console Logger
//
// Writes one `[LEVEL] message` line per enabled record to stderr, leaving
// stdout to generated output. Lines are written under a lock so records from
// documents lowered on different rayon workers never interleave.

use super::logger::{LogLevel, Logger};
use std::io::{self, Write};
use std::sync::Mutex;

pub struct ConsoleLogger {
    level: LogLevel,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        ConsoleLogger::with_writer(level, io::stderr())
    }

    /// Log to `writer` instead of stderr.
    pub fn with_writer(level: LogLevel, writer: impl Write + Send + 'static) -> Self {
        ConsoleLogger {
            level,
            out: Mutex::new(Box::new(writer)),
        }
    }

    fn emit(&self, level: LogLevel, msg: &str) {
        if !self.is_enabled(level) {
            return;
        }
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Write errors are ignored.
        let _ = writeln!(out, "[{}] {}", label(level), msg);
    }
}

fn label(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Debug => "DEBUG",
        LogLevel::Info => "INFO",
        LogLevel::Warn => "WARN",
        LogLevel::Error => "ERROR",
    }
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn debug(&self, msg: &str) {
        self.emit(LogLevel::Debug, msg);
    }

    fn info(&self, msg: &str) {
        self.emit(LogLevel::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.emit(LogLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.emit(LogLevel::Error, msg);
    }
}
