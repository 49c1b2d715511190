//! Shared fixtures for orchestrator tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use crate::config::Settings;
use crate::logging::{self, JobLogger, LogConfig, SharedBuffer};
use crate::models::{JobPaths, JobSpec};
use crate::tools::ToolPaths;

use super::types::Context;

/// Context for a job under a fresh temp dir, with both job directories
/// already created. Tools are bare names and never resolved.
pub fn test_context(languages: &[&str]) -> (Context, TempDir) {
    logging::init_test_tracing();

    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::default();
    let job = JobSpec::new("https://host/path/playlist.m3u8", "Show", "Ep 1")
        .with_languages(languages.iter().copied());
    let paths = JobPaths::new(dir.path(), &job, &settings);
    fs::create_dir_all(&paths.work_dir).unwrap();

    let tools = ToolPaths {
        downloader_name: "yt-dlp".to_string(),
        downloader: PathBuf::from("yt-dlp"),
        media_tool_name: "ffmpeg".to_string(),
        media_tool: PathBuf::from("ffmpeg"),
    };
    let logger = JobLogger::new("test", LogConfig::default(), Box::new(SharedBuffer::new()));

    let ctx = Context::new(job, settings, paths, tools, Arc::new(logger));
    (ctx, dir)
}

/// Stand-in executables that record every call to `invocations.log`.
#[cfg(unix)]
pub struct FakeTools {
    pub downloader: PathBuf,
    pub media_tool: PathBuf,
    pub invocations: PathBuf,
}

/// Write a fake `yt-dlp` and `ffmpeg` into `<dir>/bin`.
///
/// The downloader creates whatever follows `--output`/`-o` and prints a
/// couple of progress lines. With `fail_lang` set it exits 3 when asked
/// for `<fail_lang>.m3u8`. The media tool creates its last argument.
#[cfg(unix)]
pub fn fake_tools(dir: &Path, fail_lang: Option<&str>) -> FakeTools {
    let bin = dir.join("bin");
    fs::create_dir_all(&bin).unwrap();
    let invocations = dir.join("invocations.log");

    let fail_case = match fail_lang {
        Some(lang) => format!(
            "  case \"$a\" in *{}.m3u8) echo 'ERROR: HTTP Error 404' >&2; exit 3;; esac\n",
            lang
        ),
        None => String::new(),
    };

    let downloader = bin.join("yt-dlp");
    write_script(
        &downloader,
        &format!(
            "#!/bin/sh\n\
             echo \"yt-dlp $*\" >> '{log}'\n\
             out=''\n\
             prev=''\n\
             for a in \"$@\"; do\n\
             {fail_case}\
             \x20 case \"$prev\" in --output|-o) out=\"$a\";; esac\n\
             \x20 prev=\"$a\"\n\
             done\n\
             printf '[download]  50.0%%\\r[download] 100.0%%\\n'\n\
             : > \"$out\"\n",
            log = invocations.display(),
            fail_case = fail_case,
        ),
    );

    let media_tool = bin.join("ffmpeg");
    write_script(
        &media_tool,
        &format!(
            "#!/bin/sh\n\
             echo \"ffmpeg $*\" >> '{log}'\n\
             for a in \"$@\"; do last=\"$a\"; done\n\
             echo 'frame=  10 fps=0.0' >&2\n\
             : > \"$last\"\n",
            log = invocations.display(),
        ),
    );

    FakeTools {
        downloader,
        media_tool,
        invocations,
    }
}

/// Recorded calls, one line each, oldest first.
#[cfg(unix)]
pub fn read_invocations(tools: &FakeTools) -> Vec<String> {
    fs::read_to_string(&tools.invocations)
        .map(|text| text.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

#[cfg(unix)]
fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, body).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}
