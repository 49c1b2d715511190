//! Logging infrastructure for dubmux.
//!
//! This module provides:
//! - Per-job loggers with console + optional file output
//! - A tail buffer of recent tool output for error diagnosis
//! - Integration with the `tracing` ecosystem
//!
//! The per-job logger is what the user reads on the terminal. `tracing`
//! carries developer diagnostics to stderr (and to a rolling file when a
//! logs folder is configured).
//!
//! # Example
//!
//! ```no_run
//! use dubmux_core::logging::{JobLogger, LogConfig};
//!
//! let logger = JobLogger::stdout(LogConfig::default());
//! logger.phase("Download");
//! logger.command("yt-dlp https://example.com/playlist.m3u8");
//! logger.success("Done");
//! ```

mod job_logger;
mod types;

pub use job_logger::{JobLogger, SharedBuffer};
pub use types::{LogConfig, LogLevel, MessagePrefix};

/// Flushes the tracing log file when dropped.
pub use tracing_appender::non_blocking::WorkerGuard;

use std::path::Path;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize global tracing subscriber for application-wide logging.
///
/// This sets up a subscriber that:
/// - Respects RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr
///
/// Should be called once at application startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

/// Initialize tracing with an additional daily-rolling file in `logs_dir`.
///
/// The returned guard flushes the file writer on drop; keep it alive for
/// the lifetime of the program.
pub fn init_tracing_with_file(default_level: LogLevel, logs_dir: &Path) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    let file_appender = tracing_appender::rolling::daily(logs_dir, "dubmux.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .with(filter)
        .init();

    Ok(guard)
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}
