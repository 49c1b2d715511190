//! Per-job logger with console and file output.
//!
//! Each job gets its own logger that:
//! - Writes user-facing messages to the console
//! - Mirrors them, with timestamps, to a dedicated log file (if enabled)
//! - Records external tool output in the log file and a tail buffer

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LogConfig, LogLevel, MessagePrefix};

/// Per-job logger with dual output (console + file).
pub struct JobLogger {
    /// Job name for identification.
    job_name: String,
    /// Path to log file, if file logging is enabled.
    log_path: Option<PathBuf>,
    /// Console writer (stdout in the binary).
    console: Mutex<Box<dyn Write + Send>>,
    /// File writer (buffered).
    file_writer: Mutex<Option<BufWriter<File>>>,
    /// Logging configuration.
    config: LogConfig,
    /// Recent tool output lines.
    tail_buffer: Mutex<VecDeque<String>>,
}

impl JobLogger {
    /// Create a logger writing to the given console.
    pub fn new(job_name: impl Into<String>, config: LogConfig, console: Box<dyn Write + Send>) -> Self {
        let capacity = config.error_tail;
        Self {
            job_name: job_name.into(),
            log_path: None,
            console: Mutex::new(console),
            file_writer: Mutex::new(None),
            config,
            tail_buffer: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Create a logger writing to stdout.
    pub fn stdout(config: LogConfig) -> Self {
        Self::new("dubmux", config, Box::new(io::stdout()))
    }

    /// Also write to `<log_dir>/<job_name>.log`.
    pub fn with_log_file(mut self, log_dir: impl AsRef<Path>) -> io::Result<Self> {
        let log_dir = log_dir.as_ref();
        fs::create_dir_all(log_dir)?;

        let log_path = log_dir.join(format!("{}.log", sanitize_filename(&self.job_name)));
        let file = File::create(&log_path)?;

        *self.file_writer.lock() = Some(BufWriter::new(file));
        self.log_path = Some(log_path);
        Ok(self)
    }

    /// Rename the job (before a log file is attached).
    pub fn with_job_name(mut self, job_name: impl Into<String>) -> Self {
        self.job_name = job_name.into();
        self
    }

    /// Get the job name.
    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    /// Get the log file path.
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.config.level {
            return;
        }

        {
            let mut console = self.console.lock();
            let _ = writeln!(console, "{}", message);
            let _ = console.flush();
        }
        self.write_file(message);
    }

    /// Log an info message.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log a debug message.
    pub fn debug(&self, message: &str) {
        let msg = MessagePrefix::Debug.format(message);
        self.log(LogLevel::Debug, &msg);
    }

    /// Log a warning message.
    pub fn warn(&self, message: &str) {
        let msg = MessagePrefix::Warning.format(message);
        self.log(LogLevel::Warn, &msg);
    }

    /// Log an error message.
    pub fn error(&self, message: &str) {
        let msg = MessagePrefix::Error.format(message);
        self.log(LogLevel::Error, &msg);
    }

    /// Log a command being executed.
    pub fn command(&self, command: &str) {
        let msg = MessagePrefix::Command.format(command);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a phase marker.
    pub fn phase(&self, phase_name: &str) {
        let msg = MessagePrefix::Phase.format(phase_name);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a section marker.
    pub fn section(&self, section_name: &str) {
        let msg = MessagePrefix::Section.format(section_name);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a success message.
    pub fn success(&self, message: &str) {
        let msg = MessagePrefix::Success.format(message);
        self.log(LogLevel::Info, &msg);
    }

    /// Log command tokens as pretty JSON.
    pub fn log_options_json(&self, tokens: &[String]) {
        if let Ok(json) = serde_json::to_string_pretty(tokens) {
            self.section("ffmpeg options (json)");
            self.info(&json);
        }
    }

    /// Write raw text to the console, without a newline.
    ///
    /// Used by the command runner to relay tool output, including
    /// carriage-return progress redraws.
    pub fn console_raw(&self, text: &str) {
        let mut console = self.console.lock();
        let _ = console.write_all(text.as_bytes());
        let _ = console.flush();
    }

    /// Record a line of external tool output.
    ///
    /// Goes to the tail buffer and the log file, never to the console
    /// (the runner relays it there itself).
    pub fn output_line(&self, line: &str) {
        if self.config.error_tail > 0 {
            let mut buffer = self.tail_buffer.lock();
            if buffer.len() >= self.config.error_tail {
                buffer.pop_front();
            }
            buffer.push_back(line.to_string());
        }

        self.write_file(&format!("  | {}", line));
    }

    /// Clear the tail buffer.
    pub fn clear_tail(&self) {
        self.tail_buffer.lock().clear();
    }

    /// Get the current tail buffer contents.
    pub fn get_tail(&self) -> Vec<String> {
        self.tail_buffer.lock().iter().cloned().collect()
    }

    /// Last non-blank line of tool output, if any.
    pub fn last_output_line(&self) -> Option<String> {
        self.tail_buffer
            .lock()
            .iter()
            .rev()
            .find(|line| !line.trim().is_empty())
            .map(|line| line.trim().to_string())
    }

    /// Flush console and log file.
    pub fn flush(&self) {
        let _ = self.console.lock().flush();
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writer.flush();
        }
    }

    /// Close the log file.
    pub fn close(&self) {
        self.flush();
        *self.file_writer.lock() = None;
    }

    /// Write a timestamped line to the log file (if enabled).
    fn write_file(&self, message: &str) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let timestamp = Local::now().format("%H:%M:%S");
            let _ = writeln!(writer, "[{}] {}", timestamp, message);
        }
    }
}

impl Drop for JobLogger {
    fn drop(&mut self) {
        self.close();
    }
}

/// Sanitize a string to be safe for use as a filename.
pub(crate) fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

/// Cloneable in-memory writer for capturing console output.
#[derive(Clone, Default)]
pub struct SharedBuffer(std::sync::Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
