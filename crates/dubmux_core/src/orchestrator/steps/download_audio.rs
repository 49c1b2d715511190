//! Download audio step - fetches each extra language track with yt-dlp.

use crate::languages;
use crate::locator::derive_audio_url;
use crate::models::AudioTrack;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, StepOutcome};

/// Downloads the extra audio tracks one after another.
///
/// The first failing download aborts the step; there is no partial mux.
pub struct DownloadAudioStep;

impl DownloadAudioStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DownloadAudioStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for DownloadAudioStep {
    fn name(&self) -> &str {
        "Download audio"
    }

    fn description(&self) -> &str {
        "Download extra language audio tracks with yt-dlp"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        for lang_id in &ctx.job.extra_languages {
            derive_audio_url(&ctx.job.url, lang_id)?;
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        if ctx.job.extra_languages.is_empty() {
            return Ok(StepOutcome::Skipped("No extra languages requested".to_string()));
        }

        for lang_id in &ctx.job.extra_languages {
            let lang_name = languages::display_name(lang_id);
            ctx.logger.info(&format!("Downloading {} audio...", lang_name));

            let audio_url = derive_audio_url(&ctx.job.url, lang_id)?;
            let output = ctx.paths.audio_file(lang_id);

            let cmd = ctx
                .downloader_command(format!("Download {} Audio", lang_name))
                .with_args([
                    audio_url.to_string(),
                    "-o".to_string(),
                    output.to_string_lossy().to_string(),
                ]);
            ctx.runner.run(&cmd)?;

            state.audio_tracks.push(AudioTrack {
                lang_id: lang_id.clone(),
                path: output,
            });
        }

        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, ctx: &Context, state: &JobState) -> StepResult<()> {
        if state.audio_tracks.len() != ctx.job.extra_languages.len() {
            return Err(StepError::invalid_output(format!(
                "Expected {} audio tracks, recorded {}",
                ctx.job.extra_languages.len(),
                state.audio_tracks.len()
            )));
        }

        for track in &state.audio_tracks {
            if !track.path.is_file() {
                return Err(StepError::invalid_output(format!(
                    "Downloader reported success but {} is missing",
                    track.path.display()
                )));
            }
        }
        Ok(())
    }
}
