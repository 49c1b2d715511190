//! dubmux - Main entry point
//!
//! Handles argument parsing, configuration loading, logging setup and the
//! single top-level error report. All real work happens in `dubmux_core`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use clap::error::ErrorKind;
use directories::ProjectDirs;

use dubmux_core::config::{ConfigManager, LoggingSettings, Settings};
use dubmux_core::languages::{self, LANGUAGES};
use dubmux_core::logging::{
    init_tracing, init_tracing_with_file, JobLogger, LogConfig, LogLevel, WorkerGuard,
};
use dubmux_core::models::JobSpec;
use dubmux_core::orchestrator::{run_job, PipelineError};

mod cli;

use cli::Cli;

/// Default config path: `<platform config dir>/dubmux/settings.toml`.
fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dubmux").map(|dirs| dirs.config_dir().join("settings.toml"))
}

fn main() -> ExitCode {
    let cli = match cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                eprintln!("{}", cli::usage_text());
                return ExitCode::FAILURE;
            }
        },
    };

    if cli.list_languages {
        print_languages();
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config.clone().or_else(default_config_path) {
        Some(path) => path,
        None if cli.write_config => bail!("No config directory on this platform; pass --config"),
        None => PathBuf::new(),
    };

    let mut config_manager = ConfigManager::new(&config_path);
    if !config_path.as_os_str().is_empty() {
        config_manager
            .load_or_default()
            .with_context(|| format!("Failed to load config {}", config_path.display()))?;
    }

    if cli.write_config {
        config_manager.save()?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    let mut settings = config_manager.into_settings();
    settings.logging.level = effective_level(&settings.logging, cli.verbose);

    // Keep the guard alive until the job has finished writing.
    let _log_guard = init_logging(&settings);

    tracing::debug!("dubmux core {}", dubmux_core::version());
    tracing::debug!("Config: {}", config_path.display());

    let Some(args) = cli.job_args() else {
        bail!("URL, series and title are required");
    };

    let extra_languages = if cli.langs.is_empty() {
        settings.download.extra_languages.clone()
    } else {
        cli.langs
    };
    for lang in &extra_languages {
        if !languages::is_known(lang) {
            tracing::warn!("Unknown audio track '{}', using it as-is", lang);
        }
    }

    let job = JobSpec::new(args.url, args.series, args.title).with_languages(extra_languages);
    let logger = job_logger(&settings, &job)?;

    run_job(&settings, &job, Path::new(""), logger)?;
    Ok(())
}

/// Configured level, one step more verbose per `-v`.
fn effective_level(logging: &LoggingSettings, verbose: u8) -> LogLevel {
    logging.level.more_verbose(verbose)
}

/// Tracing to stderr, plus a rolling file when a logs folder is configured.
fn init_logging(settings: &Settings) -> Option<WorkerGuard> {
    let level = settings.logging.level;

    if settings.logging.file_logging_enabled() {
        match init_tracing_with_file(level, Path::new(&settings.logging.logs_folder)) {
            Ok(guard) => return Some(guard),
            Err(e) => eprintln!("Warning: Failed to open logs folder: {}. Logging to console only.", e),
        }
    }

    init_tracing(level);
    None
}

fn job_logger(settings: &Settings, job: &JobSpec) -> Result<Arc<JobLogger>> {
    let mut logger = JobLogger::stdout(LogConfig::from(&settings.logging)).with_job_name(job.job_name());

    if settings.logging.file_logging_enabled() {
        logger = logger
            .with_log_file(&settings.logging.logs_folder)
            .with_context(|| format!("Failed to create job log in {}", settings.logging.logs_folder))?;
    }

    Ok(Arc::new(logger))
}

fn print_languages() {
    println!("{:<24} {:<5} NAME", "ID", "CODE");
    for info in LANGUAGES {
        println!("{:<24} {:<5} {}", info.id, languages::iso639_2(info.id), info.name);
    }
}

/// Print the one diagnostic for a failed run.
fn report_error(err: &anyhow::Error) {
    tracing::debug!("{:?}", err);

    let pipeline_err = err.downcast_ref::<PipelineError>();
    eprintln!();
    if let Some((_, exit_code)) = pipeline_err.and_then(PipelineError::command_failure) {
        eprintln!("An error occurred while running a command.");
        eprintln!("Return code: {}", exit_code);
        eprintln!("See console output above for details.");
    } else if let Some(PipelineError::MissingTool(e)) = pipeline_err {
        eprintln!("Error: {}", e);
    } else {
        eprintln!("An unexpected error occurred: {:#}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_starts_from_configured_level() {
        let mut logging = LoggingSettings::default();
        assert_eq!(effective_level(&logging, 0), LogLevel::Info);
        assert_eq!(effective_level(&logging, 1), LogLevel::Debug);
        assert_eq!(effective_level(&logging, 2), LogLevel::Trace);

        logging.level = LogLevel::Warn;
        assert_eq!(effective_level(&logging, 0), LogLevel::Warn);
        assert_eq!(effective_level(&logging, 1), LogLevel::Info);
    }
}
