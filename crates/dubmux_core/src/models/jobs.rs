//! Job specification and the file layout derived from it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Settings;

/// File name of the primary (video + default audio) download.
pub const PRIMARY_FILE_NAME: &str = "video_en";

/// Parameters of one download-and-mux job.
///
/// Supplied once per invocation and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Master playlist URL.
    pub url: String,
    /// Series name; doubles as the output folder.
    pub series: String,
    /// Episode title; names the output file.
    pub title: String,
    /// Extra audio track identifiers, in mux order.
    #[serde(default)]
    pub extra_languages: Vec<String>,
}

impl JobSpec {
    pub fn new(url: impl Into<String>, series: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            series: series.into(),
            title: title.into(),
            extra_languages: Vec::new(),
        }
    }

    /// Set the extra languages (builder pattern).
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Display name for logs and log files.
    pub fn job_name(&self) -> String {
        format!("{} - {}", self.series, self.title)
    }

    /// File layout for this job, relative to the current directory.
    pub fn paths(&self, settings: &Settings) -> JobPaths {
        JobPaths::new(Path::new(""), self, settings)
    }
}

/// Where a job reads and writes.
///
/// ```text
/// <series>/
///     <title>.mkv              final output
///     .<title>_temp/           scratch, removed at the end
///         video_en.mkv
///         audio_pl.m4a
///         audio_de.m4a
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPaths {
    /// Series folder, holds the output.
    pub output_dir: PathBuf,
    /// Scratch directory.
    pub work_dir: PathBuf,
    /// Primary download inside the scratch directory.
    pub primary_file: PathBuf,
    /// Final muxed file.
    pub output_file: PathBuf,
    audio_extension: String,
}

impl JobPaths {
    /// Lay out a job under `root`.
    pub fn new(root: &Path, job: &JobSpec, settings: &Settings) -> Self {
        let title = file_component(&job.title);
        let output_dir = root.join(&job.series);
        let work_dir = output_dir.join(format!(".{}_temp", title));
        let primary_file = work_dir.join(format!(
            "{}.{}",
            PRIMARY_FILE_NAME, settings.download.merge_format
        ));
        let output_file = output_dir.join(format!("{}.mkv", title));

        Self {
            output_dir,
            work_dir,
            primary_file,
            output_file,
            audio_extension: settings.download.audio_extension.clone(),
        }
    }

    /// Download target for an extra audio track.
    pub fn audio_file(&self, lang_id: &str) -> PathBuf {
        self.work_dir
            .join(format!("{}.{}", file_component(lang_id), self.audio_extension))
    }
}

/// A downloaded extra audio track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioTrack {
    /// Track identifier, e.g. `audio_pl`.
    pub lang_id: String,
    /// Downloaded file.
    pub path: PathBuf,
}

/// Keep a name inside its parent directory.
fn file_component(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> JobSpec {
        JobSpec::new("https://host/path/playlist.m3u8", "My Series", "Episode 1")
            .with_languages(["audio_pl", "audio_de"])
    }

    #[test]
    fn lays_out_paths() {
        let paths = job().paths(&Settings::default());

        assert_eq!(paths.output_dir, PathBuf::from("My Series"));
        assert_eq!(paths.work_dir, PathBuf::from("My Series/.Episode 1_temp"));
        assert_eq!(
            paths.primary_file,
            PathBuf::from("My Series/.Episode 1_temp/video_en.mkv")
        );
        assert_eq!(paths.output_file, PathBuf::from("My Series/Episode 1.mkv"));
        assert_eq!(
            paths.audio_file("audio_pl"),
            PathBuf::from("My Series/.Episode 1_temp/audio_pl.m4a")
        );
    }

    #[test]
    fn title_cannot_escape_series_folder() {
        let job = JobSpec::new("u", "Show", "../Part 1/2");
        let paths = job.paths(&Settings::default());

        assert_eq!(paths.output_file, PathBuf::from("Show/.._Part 1_2.mkv"));
        assert_eq!(paths.work_dir, PathBuf::from("Show/..._Part 1_2_temp"));
    }

    #[test]
    fn rooted_layout() {
        let paths = JobPaths::new(Path::new("/data"), &job(), &Settings::default());
        assert_eq!(paths.output_file, PathBuf::from("/data/My Series/Episode 1.mkv"));
    }

    #[test]
    fn job_name_combines_series_and_title() {
        assert_eq!(job().job_name(), "My Series - Episode 1");
    }
}
