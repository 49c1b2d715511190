//! Error types for the orchestrator pipeline.
//!
//! Errors carry context that chains through layers:
//! Job → Step → Operation → Detail

use std::io;

use thiserror::Error;

use crate::io::RunError;
use crate::locator::LocatorError;
use crate::tools::MissingToolError;

/// Top-level pipeline error with job context.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A required external tool is not installed.
    #[error(transparent)]
    MissingTool(#[from] MissingToolError),

    /// A step failed during execution.
    #[error("Job '{job_name}' failed at step '{step_name}': {source}")]
    StepFailed {
        job_name: String,
        step_name: String,
        #[source]
        source: StepError,
    },

    /// Input validation failed before pipeline started.
    #[error("Job '{job_name}' failed validation: {message}")]
    ValidationFailed { job_name: String, message: String },

    /// Failed to set up job (create directories, etc.).
    #[error("Job '{job_name}' setup failed: {message}")]
    SetupFailed { job_name: String, message: String },
}

impl PipelineError {
    /// Create a step failed error.
    pub fn step_failed(
        job_name: impl Into<String>,
        step_name: impl Into<String>,
        source: StepError,
    ) -> Self {
        Self::StepFailed {
            job_name: job_name.into(),
            step_name: step_name.into(),
            source,
        }
    }

    /// Create a validation failed error.
    pub fn validation_failed(job_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            job_name: job_name.into(),
            message: message.into(),
        }
    }

    /// Create a setup failed error.
    pub fn setup_failed(job_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SetupFailed {
            job_name: job_name.into(),
            message: message.into(),
        }
    }

    /// The failed external command's tool and exit code, if that is what failed.
    pub fn command_failure(&self) -> Option<(&str, i32)> {
        match self {
            Self::StepFailed {
                source: StepError::CommandFailed { tool, exit_code, .. },
                ..
            } => Some((tool.as_str(), *exit_code)),
            _ => None,
        }
    }
}

/// Error from a pipeline step with operation context.
#[derive(Error, Debug)]
pub enum StepError {
    /// Input validation failed.
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    /// Output validation failed.
    #[error("Output validation failed: {0}")]
    InvalidOutput(String),

    /// An external command failed.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    IoError {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// A required file was not found.
    #[error("Required file not found: {path}")]
    FileNotFound { path: String },

    /// An audio URL could not be derived.
    #[error(transparent)]
    InvalidUrl(#[from] LocatorError),
}

impl StepError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an invalid output error.
    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }

    /// Create a command failed error.
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Create an I/O error with context.
    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::IoError {
            operation: operation.into(),
            source,
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

impl From<RunError> for StepError {
    fn from(err: RunError) -> Self {
        match err {
            RunError::Failed {
                tool,
                exit_code,
                last_line,
            } => StepError::command_failed(
                tool,
                exit_code,
                last_line.unwrap_or_else(|| "see console output above".to_string()),
            ),
            RunError::Spawn { tool, source } => StepError::io_error(format!("starting {}", tool), source),
            RunError::Io { tool, source } => StepError::io_error(format!("running {}", tool), source),
        }
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
