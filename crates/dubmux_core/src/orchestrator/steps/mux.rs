//! Mux step - merges video and all audio tracks into the output file using ffmpeg.

use crate::mux::{format_tokens_pretty, FfmpegOptionsBuilder};
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, MuxOutput, StepOutcome};

/// Mux step for merging tracks with ffmpeg.
///
/// Streams are copied, never re-encoded.
pub struct MuxStep;

impl MuxStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MuxStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for MuxStep {
    fn name(&self) -> &str {
        "Mux"
    }

    fn description(&self) -> &str {
        "Merge video and audio tracks into output file with ffmpeg"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        if !ctx.paths.output_dir.is_dir() {
            return Err(StepError::file_not_found(
                ctx.paths.output_dir.display().to_string(),
            ));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let primary = state
            .primary
            .clone()
            .ok_or_else(|| StepError::invalid_input("No primary download to mux"))?;

        ctx.logger.info("Muxing video and all audio tracks...");

        let output_path = ctx.paths.output_file.clone();
        let tokens = FfmpegOptionsBuilder::new(
            &primary,
            &state.audio_tracks,
            &output_path,
            &ctx.settings.mux,
        )
        .build();

        if ctx.settings.logging.show_options_json {
            ctx.logger.log_options_json(&tokens);
        }
        ctx.logger
            .debug(&format!("ffmpeg options:\n{}", format_tokens_pretty(&tokens)));

        let cmd = ctx
            .media_tool_command("Muxing final video file")
            .with_args(tokens);
        ctx.runner.run(&cmd)?;

        state.mux = Some(MuxOutput {
            output_path,
            audio_streams: state.audio_tracks.len() + 1,
            command: cmd.command_line(),
        });

        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        let mux = state
            .mux
            .as_ref()
            .ok_or_else(|| StepError::invalid_output("Mux output not recorded"))?;

        if !mux.output_path.is_file() {
            return Err(StepError::invalid_output(format!(
                "ffmpeg reported success but {} is missing",
                mux.output_path.display()
            )));
        }
        Ok(())
    }
}
