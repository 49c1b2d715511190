//! Command runner for external tools.
//!
//! Runs one tool at a time and relays its output live. stdout and stderr
//! are each drained by a reader thread and funnelled through one channel,
//! so the relay sees a single merged stream and neither pipe can fill up
//! and stall the tool (ffmpeg writes everything to stderr).

use std::io::{self, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use thiserror::Error;

use super::lines::ConsoleLines;
use super::relay::OutputRelay;
use super::shell::join_command;
use crate::logging::JobLogger;

/// Errors from running an external tool.
#[derive(Error, Debug)]
pub enum RunError {
    /// The process could not be started.
    #[error("Failed to start {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The process exited unsuccessfully.
    #[error("{tool} exited with code {exit_code}")]
    Failed {
        tool: String,
        exit_code: i32,
        /// Last non-blank line of output, usually the tool's error message.
        last_line: Option<String>,
    },

    /// Waiting on the process failed.
    #[error("I/O error while running {tool}: {source}")]
    Io {
        tool: String,
        #[source]
        source: io::Error,
    },
}

impl RunError {
    /// Exit code of a failed process, if it ran.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunError::Failed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

/// Result type for runner operations.
pub type RunResult<T> = Result<T, RunError>;

/// One invocation of an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Short tool name for messages (`yt-dlp`, `ffmpeg`).
    pub tool: String,
    /// Executable to run.
    pub program: PathBuf,
    /// Arguments.
    pub args: Vec<String>,
    /// Human-readable description shown in the output header.
    pub title: String,
}

impl ToolCommand {
    pub fn new(tool: impl Into<String>, program: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            program: program.into(),
            args: Vec::new(),
            title: title.into(),
        }
    }

    /// Append arguments (builder pattern).
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Shell-quoted command line, led by the tool name rather than its resolved path.
    pub fn command_line(&self) -> String {
        join_command(&self.tool, &self.args)
    }
}

/// Runs external tools, relaying output through the job logger.
#[derive(Clone)]
pub struct CommandRunner {
    logger: Arc<JobLogger>,
}

impl CommandRunner {
    pub fn new(logger: Arc<JobLogger>) -> Self {
        Self { logger }
    }

    /// Run a command to completion.
    ///
    /// Returns once the process has exited; a non-zero exit is
    /// `RunError::Failed`. Processes killed by a signal report exit code -1.
    pub fn run(&self, cmd: &ToolCommand) -> RunResult<()> {
        let logger = &*self.logger;

        logger.info("");
        logger.section(&format!("Running: {}", cmd.title));
        logger.command(&cmd.command_line());
        logger.info(&"-".repeat(30));
        logger.clear_tail();

        tracing::debug!("Spawning {:?} with {} args", cmd.program, cmd.args.len());

        let mut child = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunError::Spawn {
                tool: cmd.tool.clone(),
                source,
            })?;

        let (tx, rx) = mpsc::channel();
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(spawn_reader(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_reader(stderr, tx.clone()));
        }
        drop(tx);

        let mut relay = OutputRelay::new(logger);
        for line in rx {
            match line {
                Ok(line) => relay.line(&line),
                Err(e) => tracing::warn!("Error reading {} output: {}", cmd.tool, e),
            }
        }
        relay.finish();

        for reader in readers {
            let _ = reader.join();
        }

        let status = child.wait().map_err(|source| RunError::Io {
            tool: cmd.tool.clone(),
            source,
        })?;

        logger.info("----- End Live Output -----");
        logger.info("");

        if !status.success() {
            let exit_code = status.code().unwrap_or(-1);
            tracing::debug!("{} exited with {}", cmd.tool, exit_code);
            return Err(RunError::Failed {
                tool: cmd.tool.clone(),
                exit_code,
                last_line: logger.last_output_line(),
            });
        }

        Ok(())
    }
}

/// Drain a pipe on its own thread, sending each line to `tx`.
fn spawn_reader<R>(reader: R, tx: Sender<io::Result<String>>) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        for line in ConsoleLines::new(BufReader::new(reader)) {
            let failed = line.is_err();
            if tx.send(line).is_err() || failed {
                break;
            }
        }
    })
}
