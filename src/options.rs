use std::path::Path;

use slog::{o, Logger};
use sloggers::{file::FileLoggerBuilder, types::Severity, Build};

use crate::error::Error;

/// Where and how much to log while reading example files and checking equivalences.
#[derive(Debug, Clone, Copy)]
pub struct Options<'a> {
    pub log_path: &'a str,
    pub discard_logs: bool,
    pub severity: Severity,
}

impl Default for Options<'_> {
    fn default() -> Self {
        Self {
            log_path: "./logs/log.txt",
            discard_logs: false,
            severity: Severity::Debug,
        }
    }
}

impl<'a> Options<'a> {
    pub fn default_with_path(log_path: &'a str) -> Self {
        Self {
            log_path,
            ..Default::default()
        }
    }

    /// Builds a root logger writing to `log_path`, or one that drops every record.
    pub fn logger(&self) -> Result<Logger, Error> {
        if self.discard_logs {
            return Ok(discard());
        }

        FileLoggerBuilder::new(Path::new(self.log_path))
            .level(self.severity)
            .truncate()
            .build()
            .map_err(Error::Logger)
    }
}

pub(crate) fn discard() -> Logger {
    Logger::root(slog::Discard, o!())
}
