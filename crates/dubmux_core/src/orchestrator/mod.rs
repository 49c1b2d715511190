//! Pipeline orchestrator for coordinating job execution.
//!
//! A job is a fixed sequence of steps that validate, execute, and record
//! their results into a shared `JobState`.
//!
//! # Architecture
//!
//! ```text
//! run_job
//!     ├── preflight: yt-dlp, ffmpeg
//!     ├── TempWorkspace (removed on every exit path)
//!     └── Pipeline
//!         ├── Step: DownloadVideo
//!         ├── Step: DownloadAudio
//!         └── Step: Mux
//! ```
//!
//! # Example
//!
//! ```ignore
//! use dubmux_core::orchestrator::run_job;
//!
//! let job = JobSpec::new(url, "Show", "Episode 1").with_languages(["audio_pl"]);
//! let output = run_job(&settings, &job, Path::new(""), logger)?;
//! println!("Wrote {}", output.output_path.display());
//! ```

mod errors;
mod job;
mod pipeline;
mod step;
pub mod steps;
mod types;
mod workspace;

#[cfg(test)]
pub(crate) mod test_support;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use job::{create_standard_pipeline, run_job};
pub use pipeline::{Pipeline, PipelineRunResult};
pub use step::PipelineStep;
pub use steps::{DownloadAudioStep, DownloadVideoStep, MuxStep};
pub use types::{Context, JobState, MuxOutput, StepOutcome};
pub use workspace::TempWorkspace;
