// # Diagnostics Sink
//
// Human-readable status and error lines. Every line goes to the console via
// `tracing` and, when a log file is configured, is appended to it as
//
// ```text
// 2026-10-18 09:30:00 - IPv4 DNS record updated successfully, ip: 1.2.3.5
// ```
//
// The file is opened (create + append) for each line and closed right after,
// so several instances can share one file. Failing to open or write it is
// reported on stderr and otherwise ignored: diagnostics never abort
// reconciliation.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

/// Timestamp layout of log file lines
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Console + append-only file sink
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    log_file: Option<PathBuf>,
}

impl Diagnostics {
    /// Sink that also appends to `log_file`
    pub fn new(log_file: impl Into<PathBuf>) -> Self {
        Self {
            log_file: Some(log_file.into()),
        }
    }

    /// Console-only sink
    pub fn console_only() -> Self {
        Self { log_file: None }
    }

    /// Sink for an optional log file
    pub fn from_option(log_file: Option<PathBuf>) -> Self {
        Self { log_file }
    }

    /// The log file in use, if any
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Record a status line
    pub fn info(&self, message: &str) {
        tracing::info!("{}", message);
        self.append(message);
    }

    /// Record an error line
    pub fn error(&self, message: &str) {
        tracing::error!("{}", message);
        self.append(message);
    }

    fn append(&self, message: &str) {
        let Some(path) = self.log_file.as_deref() else {
            return;
        };

        let mut file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Error opening log file: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(file, "{}", format_line(message)) {
            eprintln!("Error writing log file: {}", e);
        }
    }
}

fn format_line(message: &str) -> String {
    format!("{} - {}", Local::now().format(TIMESTAMP_FORMAT), message)
}
