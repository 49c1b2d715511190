//! External process execution.
//!
//! - **lines**: splits tool output on `\n`, `\r` and `\r\n`
//! - **relay**: progress-aware console relay
//! - **runner**: spawns a tool, relays its merged output, checks the exit code
//! - **shell**: quoting for echoing command lines

mod lines;
mod relay;
mod runner;
mod shell;

pub use lines::ConsoleLines;
pub use relay::{is_progress_line, OutputRelay, RelayState, PROGRESS_PREFIXES};
pub use runner::{CommandRunner, RunError, RunResult, ToolCommand};
pub use shell::{escape, join_command};
