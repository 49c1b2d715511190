//! Core types for the orchestrator pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::io::{CommandRunner, ToolCommand};
use crate::logging::JobLogger;
use crate::models::{AudioTrack, JobPaths, JobSpec};
use crate::tools::ToolPaths;

/// Read-only context passed to pipeline steps.
///
/// Contains job configuration and shared resources that steps can read
/// but not modify. Mutable state goes in `JobState`.
pub struct Context {
    /// Job specification (URL, series, title, languages).
    pub job: JobSpec,
    /// Application settings.
    pub settings: Settings,
    /// Job name/identifier.
    pub job_name: String,
    /// File layout for this job.
    pub paths: JobPaths,
    /// Resolved external tools.
    pub tools: ToolPaths,
    /// Per-job logger.
    pub logger: Arc<JobLogger>,
    /// Runner for external commands.
    pub runner: CommandRunner,
}

impl Context {
    /// Create a new context for a job.
    pub fn new(
        job: JobSpec,
        settings: Settings,
        paths: JobPaths,
        tools: ToolPaths,
        logger: Arc<JobLogger>,
    ) -> Self {
        Self {
            job_name: job.job_name(),
            job,
            settings,
            paths,
            tools,
            runner: CommandRunner::new(Arc::clone(&logger)),
            logger,
        }
    }

    /// Start a downloader invocation.
    pub fn downloader_command(&self, title: impl Into<String>) -> ToolCommand {
        ToolCommand::new(&self.tools.downloader_name, &self.tools.downloader, title)
    }

    /// Start a media tool invocation.
    pub fn media_tool_command(&self, title: impl Into<String>) -> ToolCommand {
        ToolCommand::new(&self.tools.media_tool_name, &self.tools.media_tool, title)
    }
}

/// Mutable job state that accumulates results from pipeline steps.
///
/// Steps add their own section and do not overwrite earlier ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobState {
    /// Job identifier.
    pub job_id: String,
    /// Primary download (video + default audio).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<PathBuf>,
    /// Extra audio tracks, in download order.
    #[serde(default)]
    pub audio_tracks: Vec<AudioTrack>,
    /// Mux step results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mux: Option<MuxOutput>,
}

impl JobState {
    /// Create a new job state with the given ID.
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            ..Default::default()
        }
    }
}

/// Output from the Mux step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuxOutput {
    /// Path to final merged file.
    pub output_path: PathBuf,
    /// Number of audio streams in the output.
    pub audio_streams: usize,
    /// ffmpeg command that was run.
    pub command: String,
}

/// Result of executing a pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step completed successfully.
    Success,
    /// Step was skipped (nothing to do, but not an error).
    Skipped(String),
}
