//! Job entry point: preflight, directories, pipeline, cleanup.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::config::Settings;
use crate::locator;
use crate::logging::JobLogger;
use crate::models::{JobPaths, JobSpec};
use crate::tools;

use super::errors::{PipelineError, PipelineResult};
use super::pipeline::Pipeline;
use super::steps::{DownloadAudioStep, DownloadVideoStep, MuxStep};
use super::types::{Context, JobState, MuxOutput};
use super::workspace::TempWorkspace;

/// Create the standard pipeline with all steps in order.
///
/// 1. DownloadVideo - video + default audio
/// 2. DownloadAudio - one track per extra language
/// 3. Mux - stream-copy everything into the output file
pub fn create_standard_pipeline() -> Pipeline {
    Pipeline::new()
        .with_step(DownloadVideoStep::new())
        .with_step(DownloadAudioStep::new())
        .with_step(MuxStep::new())
}

/// Run one job with every path resolved under `root`.
///
/// Nothing is created on disk until both tools are found and every audio
/// URL can be derived. Once the scratch directory exists it is removed
/// before this returns, on success and on every error.
pub fn run_job(
    settings: &Settings,
    job: &JobSpec,
    root: &Path,
    logger: Arc<JobLogger>,
) -> PipelineResult<MuxOutput> {
    let job_name = job.job_name();
    tracing::debug!("Starting job '{}'", job_name);

    let tool_paths = tools::check_tools(&settings.tools)?;

    if job.series.trim().is_empty() {
        return Err(PipelineError::validation_failed(&job_name, "Series name is empty"));
    }
    if job.title.trim().is_empty() {
        return Err(PipelineError::validation_failed(&job_name, "Title is empty"));
    }

    if !job.extra_languages.is_empty() {
        locator::validate_primary(&job.url)
            .map_err(|e| PipelineError::validation_failed(&job_name, e.to_string()))?;
    }

    let paths = JobPaths::new(root, job, settings);

    fs::create_dir_all(&paths.output_dir).map_err(|e| {
        PipelineError::setup_failed(
            &job_name,
            format!("Failed to create {}: {}", paths.output_dir.display(), e),
        )
    })?;

    let workspace = TempWorkspace::create(&paths.work_dir, Arc::clone(&logger)).map_err(|e| {
        PipelineError::setup_failed(
            &job_name,
            format!("Failed to create {}: {}", paths.work_dir.display(), e),
        )
    })?;

    let ctx = Context::new(job.clone(), settings.clone(), paths, tool_paths, Arc::clone(&logger));
    let mut state = JobState::new(&job_name);

    let pipeline = create_standard_pipeline();
    tracing::debug!("Pipeline: {}", pipeline.step_names().join(" -> "));
    logger.phase(&job_name);

    let result = pipeline.run(&ctx, &mut state);

    if let Err(e) = workspace.remove() {
        logger.warn(&format!("Failed to remove temporary files: {}", e));
    }

    let run = result?;
    tracing::debug!(
        "Job '{}' finished: {} of {} steps ran, {} skipped",
        job_name,
        run.total_steps(),
        pipeline.step_count(),
        run.steps_skipped.len()
    );

    let output = state
        .mux
        .ok_or_else(|| PipelineError::validation_failed(&job_name, "No output was produced"))?;

    logger.info("");
    logger.success(&format!(
        "Successfully created '{}' with multiple audio tracks.",
        output.output_path.display()
    ));
    logger.flush();

    Ok(output)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::logging::{LogConfig, SharedBuffer};
    use crate::orchestrator::test_support::{fake_tools, read_invocations, FakeTools};
    use tempfile::tempdir;

    const URL: &str = "https://host/path/playlist.m3u8";

    fn logger() -> (Arc<JobLogger>, SharedBuffer) {
        let console = SharedBuffer::new();
        let logger = JobLogger::new("job", LogConfig::default(), Box::new(console.clone()));
        (Arc::new(logger), console)
    }

    fn settings_for(tools: &FakeTools) -> Settings {
        let mut settings = Settings::default();
        settings.tools.downloader = tools.downloader.to_string_lossy().to_string();
        settings.tools.media_tool = tools.media_tool.to_string_lossy().to_string();
        settings
    }

    #[test]
    fn successful_job_leaves_only_output() {
        let dir = tempdir().unwrap();
        let tools = fake_tools(dir.path(), None);
        let root = dir.path().join("out");
        let job = JobSpec::new(URL, "Show", "Ep 1").with_languages(["audio_pl", "audio_de"]);
        let (logger, console) = logger();

        let output = run_job(&settings_for(&tools), &job, &root, logger).unwrap();

        assert_eq!(output.output_path, root.join("Show").join("Ep 1.mkv"));
        assert_eq!(output.audio_streams, 3);
        assert!(output.output_path.is_file());
        assert!(!root.join("Show").join(".Ep 1_temp").exists());

        let calls = read_invocations(&tools);
        assert_eq!(calls.len(), 4);
        assert!(calls[1].contains("https://host/path/audio_pl.m3u8"));
        assert!(calls[2].contains("https://host/path/audio_de.m3u8"));
        assert!(calls[3].starts_with("ffmpeg "));
        assert!(calls[3].contains("language=pol"));

        let text = console.contents();
        assert!(text.contains("Downloading main video for 'Ep 1'..."));
        assert!(text.contains("Downloading Polish audio..."));
        assert!(text.contains("=== Show - Ep 1 ==="));
        assert!(text.contains("[SUCCESS] Successfully created"));
    }

    #[test]
    fn no_extra_languages_muxes_single_input() {
        let dir = tempdir().unwrap();
        let tools = fake_tools(dir.path(), None);
        let root = dir.path().join("out");
        let job = JobSpec::new(URL, "Show", "Ep 2");
        let (logger, _console) = logger();

        let output = run_job(&settings_for(&tools), &job, &root, logger).unwrap();

        assert_eq!(output.audio_streams, 1);
        let calls = read_invocations(&tools);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].matches(" -i ").count(), 1);
    }

    #[test]
    fn failed_audio_download_skips_mux_and_cleans_up() {
        let dir = tempdir().unwrap();
        let tools = fake_tools(dir.path(), Some("audio_de"));
        let root = dir.path().join("out");
        let job = JobSpec::new(URL, "Show", "Ep 3").with_languages(["audio_pl", "audio_de"]);
        let (logger, _console) = logger();

        let err = run_job(&settings_for(&tools), &job, &root, logger).unwrap_err();

        assert_eq!(err.command_failure(), Some(("yt-dlp", 3)));
        assert!(!root.join("Show").join(".Ep 3_temp").exists());
        assert!(!root.join("Show").join("Ep 3.mkv").exists());
        assert!(read_invocations(&tools)
            .iter()
            .all(|call| !call.starts_with("ffmpeg ")));
    }

    #[test]
    fn missing_tool_creates_nothing() {
        let dir = tempdir().unwrap();
        let tools = fake_tools(dir.path(), None);
        let mut settings = settings_for(&tools);
        settings.tools.media_tool = "dubmux-no-such-muxer".to_string();
        let root = dir.path().join("out");
        let (logger, _console) = logger();

        let err = run_job(&settings, &JobSpec::new(URL, "Show", "Ep 4"), &root, logger).unwrap_err();

        assert!(matches!(err, PipelineError::MissingTool(_)));
        assert!(!root.exists());
        assert!(read_invocations(&tools).is_empty());
    }

    #[test]
    fn bad_url_rejected_before_setup() {
        let dir = tempdir().unwrap();
        let tools = fake_tools(dir.path(), None);
        let root = dir.path().join("out");
        let job = JobSpec::new("not a url", "Show", "Ep 5").with_languages(["audio_pl"]);
        let (logger, _console) = logger();

        let err = run_job(&settings_for(&tools), &job, &root, logger).unwrap_err();

        assert!(matches!(err, PipelineError::ValidationFailed { .. }));
        assert!(!root.exists());
    }

    #[test]
    fn blank_series_or_title_rejected_before_download() {
        let dir = tempdir().unwrap();
        let tools = fake_tools(dir.path(), None);
        let root = dir.path().join("out");

        for (series, title) in [("", "Ep 6"), ("  ", "Ep 6"), ("Show", "")] {
            let job = JobSpec::new(URL, series, title).with_languages(["audio_pl"]);
            let (logger, _console) = logger();

            let err = run_job(&settings_for(&tools), &job, &root, logger).unwrap_err();

            assert!(matches!(err, PipelineError::ValidationFailed { .. }), "{series:?}/{title:?}");
        }

        assert!(!root.exists());
        assert!(read_invocations(&tools).is_empty());
    }

    #[test]
    fn step_failure_is_written_to_job_log() {
        let dir = tempdir().unwrap();
        let tools = fake_tools(dir.path(), Some("audio_pl"));
        let root = dir.path().join("out");
        let job = JobSpec::new(URL, "Show", "Ep 7").with_languages(["audio_pl"]);
        let (logger, console) = logger();

        run_job(&settings_for(&tools), &job, &root, logger).unwrap_err();

        let text = console.contents();
        assert!(text.contains("[ERROR] Step 'Download audio' failed"));
        assert!(!text.contains("[SUCCESS]"));
    }
}
