//! Preflight check for the external tools.
//!
//! Both tools must resolve before any directory is created or any download
//! starts. Configured names are looked up on PATH; anything containing a
//! path separator is checked as a path.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ToolSettings;

/// A required tool could not be found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{tool}' command not found. Please ensure {tool} is installed and in your system's PATH.")]
pub struct MissingToolError {
    /// Configured tool name or path.
    pub tool: String,
}

/// Resolved executables for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// Downloader display name.
    pub downloader_name: String,
    /// Downloader executable.
    pub downloader: PathBuf,
    /// Media tool display name.
    pub media_tool_name: String,
    /// Media tool executable.
    pub media_tool: PathBuf,
}

/// Resolve one tool.
pub fn find_tool(tool: &str) -> Result<PathBuf, MissingToolError> {
    which::which(tool).map_err(|e| {
        tracing::debug!("Lookup of '{}' failed: {}", tool, e);
        MissingToolError {
            tool: tool.to_string(),
        }
    })
}

/// Resolve the downloader and the media tool, downloader first.
pub fn check_tools(settings: &ToolSettings) -> Result<ToolPaths, MissingToolError> {
    let downloader = find_tool(&settings.downloader)?;
    let media_tool = find_tool(&settings.media_tool)?;

    tracing::debug!(
        "Using downloader {} and media tool {}",
        downloader.display(),
        media_tool.display()
    );

    Ok(ToolPaths {
        downloader_name: tool_name(&settings.downloader),
        downloader,
        media_tool_name: tool_name(&settings.media_tool),
        media_tool,
    })
}

/// Short name of a configured tool (`/opt/bin/ffmpeg` -> `ffmpeg`).
fn tool_name(configured: &str) -> String {
    std::path::Path::new(configured)
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| configured.to_string())
}
