//! Progress-aware relay of tool output to the console.
//!
//! Progress lines are redrawn in place with a trailing `\r` instead of
//! scrolling the terminal. A single newline is emitted when a normal line
//! follows a progress line, and when the stream ends on one.

use crate::logging::JobLogger;

/// Line prefixes (after leading whitespace) that mark progress output.
///
/// `[download]` and `[ffmpeg]` come from yt-dlp, `frame=` and `size=` from
/// ffmpeg's stats line.
pub const PROGRESS_PREFIXES: [&str; 4] = ["[download]", "[ffmpeg]", "frame=", "size="];

/// Whether a line is a progress indicator.
pub fn is_progress_line(line: &str) -> bool {
    let stripped = line.trim_start();
    PROGRESS_PREFIXES
        .iter()
        .any(|prefix| stripped.starts_with(prefix))
}

/// What the last relayed line was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelayState {
    /// Cursor is at the start of a fresh line.
    #[default]
    Normal,
    /// Cursor sits after a `\r`-terminated progress line.
    InProgressLine,
}

/// Relays lines of one tool invocation to the job logger.
pub struct OutputRelay<'a> {
    logger: &'a JobLogger,
    state: RelayState,
}

impl<'a> OutputRelay<'a> {
    pub fn new(logger: &'a JobLogger) -> Self {
        Self {
            logger,
            state: RelayState::Normal,
        }
    }

    /// Current state.
    pub fn state(&self) -> RelayState {
        self.state
    }

    /// Relay one line (without terminator).
    pub fn line(&mut self, line: &str) {
        self.logger.output_line(line);

        if is_progress_line(line) {
            self.logger.console_raw(&format!("{}\r", line.trim()));
            self.state = RelayState::InProgressLine;
        } else {
            if self.state == RelayState::InProgressLine {
                self.logger.console_raw("\n");
            }
            self.logger.console_raw(&format!("{}\n", line));
            self.state = RelayState::Normal;
        }
    }

    /// End of stream: terminate a pending progress line.
    pub fn finish(&mut self) {
        if self.state == RelayState::InProgressLine {
            self.logger.console_raw("\n");
            self.state = RelayState::Normal;
        }
    }
}
