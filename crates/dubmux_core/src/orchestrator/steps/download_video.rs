//! Download video step - fetches the video and default audio with yt-dlp.

use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, StepOutcome};

/// Downloads best video + best audio, merged into one container.
pub struct DownloadVideoStep;

impl DownloadVideoStep {
    pub fn new() -> Self {
        Self
    }

    /// yt-dlp arguments for the primary download.
    fn args(ctx: &Context) -> Vec<String> {
        let download = &ctx.settings.download;
        vec![
            ctx.job.url.clone(),
            "-f".to_string(),
            download.format.clone(),
            "--merge-output-format".to_string(),
            download.merge_format.clone(),
            "--output".to_string(),
            ctx.paths.primary_file.to_string_lossy().to_string(),
        ]
    }
}

impl Default for DownloadVideoStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for DownloadVideoStep {
    fn name(&self) -> &str {
        "Download video"
    }

    fn description(&self) -> &str {
        "Download video and default audio with yt-dlp"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        if ctx.job.url.trim().is_empty() {
            return Err(StepError::invalid_input("No URL given"));
        }
        if !ctx.paths.work_dir.is_dir() {
            return Err(StepError::file_not_found(
                ctx.paths.work_dir.display().to_string(),
            ));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        ctx.logger
            .info(&format!("Downloading main video for '{}'...", ctx.job.title));

        let cmd = ctx
            .downloader_command("Download Main Video + English Audio")
            .with_args(Self::args(ctx));
        ctx.runner.run(&cmd)?;

        state.primary = Some(ctx.paths.primary_file.clone());
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        let primary = state
            .primary
            .as_ref()
            .ok_or_else(|| StepError::invalid_output("Primary download not recorded"))?;

        if !primary.is_file() {
            return Err(StepError::invalid_output(format!(
                "Downloader reported success but {} is missing",
                primary.display()
            )));
        }
        Ok(())
    }
}
