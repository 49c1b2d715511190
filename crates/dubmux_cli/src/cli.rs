//! Command-line arguments.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Download an episode with extra-language audio tracks and mux them into one MKV.
#[derive(Parser, Debug)]
#[command(name = "dubmux", version)]
pub struct Cli {
    /// Master playlist URL of the episode
    #[arg(required_unless_present_any = ["list_languages", "write_config"])]
    pub url: Option<String>,

    /// Series name; used as the output folder
    #[arg(required_unless_present_any = ["list_languages", "write_config"])]
    pub series: Option<String>,

    /// Episode title; used as the output file name
    #[arg(required_unless_present_any = ["list_languages", "write_config"])]
    pub title: Option<String>,

    /// Extra audio track to fetch, e.g. audio_pl (repeatable; replaces the configured list)
    #[arg(long = "lang", value_name = "ID")]
    pub langs: Vec<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print the known audio track identifiers and exit
    #[arg(long, conflicts_with_all = ["url", "write_config"])]
    pub list_languages: bool,

    /// Write the effective settings to the config file and exit
    #[arg(long, conflicts_with = "url")]
    pub write_config: bool,
}

/// The three job positionals, when a job was requested.
pub struct JobArgs {
    pub url: String,
    pub series: String,
    pub title: String,
}

impl Cli {
    /// Positionals for a download job, if all three were given.
    pub fn job_args(&self) -> Option<JobArgs> {
        match (&self.url, &self.series, &self.title) {
            (Some(url), Some(series), Some(title)) => Some(JobArgs {
                url: url.clone(),
                series: series.clone(),
                title: title.clone(),
            }),
            _ => None,
        }
    }
}

/// Parse arguments without exiting the process.
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Short usage shown for any argument error.
pub fn usage_text() -> String {
    [
        "Usage: dubmux \"<url>\" \"<series>\" \"<title>\"",
        "Example: dubmux \"https://example.com/playlist.m3u8\" \"My Series\" \"Episode 1\"",
        "",
        "Run 'dubmux --help' for all options.",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn three_positionals_make_a_job() {
        let cli = parse_args(["dubmux", "https://host/p.m3u8", "Show", "Ep 1"]).unwrap();
        let job = cli.job_args().unwrap();

        assert_eq!(job.url, "https://host/p.m3u8");
        assert_eq!(job.series, "Show");
        assert_eq!(job.title, "Ep 1");
        assert!(cli.langs.is_empty());
    }

    #[test]
    fn too_few_positionals_is_an_error() {
        assert!(parse_args(["dubmux"]).is_err());
        assert!(parse_args(["dubmux", "https://host/p.m3u8"]).is_err());

        let err = parse_args(["dubmux", "https://host/p.m3u8", "Show"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn too_many_positionals_is_an_error() {
        assert!(parse_args(["dubmux", "u", "s", "t", "extra"]).is_err());
    }

    #[test]
    fn help_is_not_a_usage_error() {
        let err = parse_args(["dubmux", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn lang_is_repeatable() {
        let cli = parse_args([
            "dubmux", "u", "s", "t", "--lang", "audio_pl", "--lang", "audio_de", "-vv",
        ])
        .unwrap();

        assert_eq!(cli.langs, vec!["audio_pl", "audio_de"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn list_languages_needs_no_positionals() {
        let cli = parse_args(["dubmux", "--list-languages"]).unwrap();
        assert!(cli.list_languages);
        assert!(cli.job_args().is_none());
    }

    #[test]
    fn write_config_accepts_path() {
        let cli = parse_args(["dubmux", "--write-config", "--config", "/tmp/x.toml"]).unwrap();
        assert!(cli.write_config);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.toml")));
    }

    #[test]
    fn usage_has_example() {
        let text = usage_text();
        assert!(text.starts_with("Usage: dubmux"));
        assert!(text.contains("Example:"));
    }
}
