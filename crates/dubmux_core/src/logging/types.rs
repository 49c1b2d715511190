//! Logging types and configuration.

use serde::{Deserialize, Serialize};

/// Log level for filtering messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum LogLevel {
    /// Trace-level debugging (very verbose).
    Trace,
    /// Debug information.
    Debug,
    /// General information.
    #[default]
    Info,
    /// Warnings.
    Warn,
    /// Errors.
    Error,
}

impl LogLevel {
    /// Raise verbosity by `steps` levels, saturating at Trace.
    pub fn more_verbose(self, steps: u8) -> Self {
        let mut level = self;
        for _ in 0..steps {
            level = match level {
                LogLevel::Error => LogLevel::Warn,
                LogLevel::Warn => LogLevel::Info,
                LogLevel::Info => LogLevel::Debug,
                LogLevel::Debug | LogLevel::Trace => LogLevel::Trace,
            };
        }
        level
    }
}

/// Configuration for a job logger.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level to output.
    pub level: LogLevel,
    /// Number of tool output lines kept in the tail buffer.
    pub error_tail: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            error_tail: 20,
        }
    }
}

impl From<&crate::config::LoggingSettings> for LogConfig {
    fn from(settings: &crate::config::LoggingSettings) -> Self {
        Self {
            level: settings.level,
            error_tail: settings.error_tail,
        }
    }
}

/// Message prefix types for consistent formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePrefix {
    /// Shell command: `$ command`
    Command,
    /// Phase marker: `=== Phase ===`
    Phase,
    /// Section marker: `----- Section -----`
    Section,
    /// Success: `[SUCCESS]`
    Success,
    /// Warning: `[WARNING]`
    Warning,
    /// Error: `[ERROR]`
    Error,
    /// Debug: `[DEBUG]`
    Debug,
}

impl MessagePrefix {
    /// Format a message with this prefix.
    pub fn format(&self, message: &str) -> String {
        match self {
            MessagePrefix::Command => format!("$ {}", message),
            MessagePrefix::Phase => format!("=== {} ===", message),
            MessagePrefix::Section => format!("----- {} -----", message),
            MessagePrefix::Success => format!("[SUCCESS] {}", message),
            MessagePrefix::Warning => format!("[WARNING] {}", message),
            MessagePrefix::Error => format!("[ERROR] {}", message),
            MessagePrefix::Debug => format!("[DEBUG] {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_saturates() {
        assert_eq!(LogLevel::Info.more_verbose(0), LogLevel::Info);
        assert_eq!(LogLevel::Info.more_verbose(1), LogLevel::Debug);
        assert_eq!(LogLevel::Info.more_verbose(5), LogLevel::Trace);
    }

    #[test]
    fn prefixes_format() {
        assert_eq!(MessagePrefix::Section.format("Running: Mux"), "----- Running: Mux -----");
        assert_eq!(MessagePrefix::Command.format("ffmpeg -y"), "$ ffmpeg -y");
    }
}
