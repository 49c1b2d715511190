//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Every field has a default, so any subset of keys may be present.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// External tool locations.
    #[serde(default)]
    pub tools: ToolSettings,

    /// yt-dlp options and which extra languages to fetch.
    #[serde(default)]
    pub download: DownloadSettings,

    /// ffmpeg mux options.
    #[serde(default)]
    pub mux: MuxSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Config file sections, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Tools,
    Download,
    Mux,
    Logging,
}

impl ConfigSection {
    /// All sections in the order they are written.
    pub const ALL: [ConfigSection; 4] = [
        ConfigSection::Tools,
        ConfigSection::Download,
        ConfigSection::Mux,
        ConfigSection::Logging,
    ];

    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Tools => "tools",
            ConfigSection::Download => "download",
            ConfigSection::Mux => "mux",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the section.
    pub fn description(&self) -> &'static str {
        match self {
            ConfigSection::Tools => "External tools (name on PATH or absolute path)",
            ConfigSection::Download => "yt-dlp download options",
            ConfigSection::Mux => "ffmpeg mux options",
            ConfigSection::Logging => "Logging configuration",
        }
    }
}

/// External tool configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Downloader executable.
    #[serde(default = "default_downloader")]
    pub downloader: String,

    /// Media tool executable.
    #[serde(default = "default_media_tool")]
    pub media_tool: String,
}

fn default_downloader() -> String {
    "yt-dlp".to_string()
}

fn default_media_tool() -> String {
    "ffmpeg".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            downloader: default_downloader(),
            media_tool: default_media_tool(),
        }
    }
}

/// Download configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadSettings {
    /// yt-dlp format selector for the primary download.
    #[serde(default = "default_format")]
    pub format: String,

    /// Container yt-dlp merges the primary video and audio into.
    #[serde(default = "default_merge_format")]
    pub merge_format: String,

    /// File extension for downloaded audio tracks.
    #[serde(default = "default_audio_extension")]
    pub audio_extension: String,

    /// Audio track identifiers to fetch in addition to the default track.
    #[serde(default = "default_extra_languages")]
    pub extra_languages: Vec<String>,
}

fn default_format() -> String {
    "bestvideo+bestaudio/best".to_string()
}

fn default_merge_format() -> String {
    "mkv".to_string()
}

fn default_audio_extension() -> String {
    "m4a".to_string()
}

fn default_extra_languages() -> Vec<String> {
    vec!["audio_pl".to_string(), "audio_de".to_string()]
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            format: default_format(),
            merge_format: default_merge_format(),
            audio_extension: default_audio_extension(),
            extra_languages: default_extra_languages(),
        }
    }
}

/// Mux configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuxSettings {
    /// Overwrite an existing output file (`-y`).
    #[serde(default = "default_true")]
    pub overwrite: bool,
}

fn default_true() -> bool {
    true
}

impl Default for MuxSettings {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level for job messages and diagnostics; each `-v` lowers it
    /// one step. `RUST_LOG` overrides it for diagnostics only.
    #[serde(default)]
    pub level: LogLevel,

    /// Folder for per-job log files. Empty disables file logging.
    #[serde(default)]
    pub logs_folder: String,

    /// Number of tool output lines kept for error reports.
    #[serde(default = "default_error_tail")]
    pub error_tail: usize,

    /// Log the ffmpeg arguments as JSON before muxing.
    #[serde(default)]
    pub show_options_json: bool,
}

fn default_error_tail() -> usize {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            logs_folder: String::new(),
            error_tail: default_error_tail(),
            show_options_json: false,
        }
    }
}

impl LoggingSettings {
    /// Whether per-job log files are enabled.
    pub fn file_logging_enabled(&self) -> bool {
        !self.logs_folder.trim().is_empty()
    }
}
