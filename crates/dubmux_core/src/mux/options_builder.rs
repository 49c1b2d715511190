//! ffmpeg command options builder.
//!
//! Builds the argument list that remuxes the primary download and every
//! extra audio track into one Matroska file:
//!
//! ```text
//! -y -i video_en.mkv -i audio_pl.m4a -i audio_de.m4a
//!    -map 0:v:0 -map 0:a:0 -map 1:a:0 -map 2:a:0
//!    -metadata:s:a:0 language=eng -metadata:s:a:0 title=English
//!    -metadata:s:a:1 language=pol -metadata:s:a:1 title=Polish
//!    -metadata:s:a:2 language=ger -metadata:s:a:2 title=German
//!    -c copy <output>
//! ```
//!
//! Input `k` (k >= 1) contributes exactly one audio stream, which becomes
//! output audio stream `k`.

use std::path::Path;

use crate::config::MuxSettings;
use crate::languages::{self, PRIMARY_LANGUAGE_CODE, PRIMARY_LANGUAGE_NAME};
use crate::models::AudioTrack;

/// Builder for ffmpeg command-line options.
pub struct FfmpegOptionsBuilder<'a> {
    primary: &'a Path,
    audio_tracks: &'a [AudioTrack],
    output_path: &'a Path,
    settings: &'a MuxSettings,
}

impl<'a> FfmpegOptionsBuilder<'a> {
    /// Create a new options builder.
    pub fn new(
        primary: &'a Path,
        audio_tracks: &'a [AudioTrack],
        output_path: &'a Path,
        settings: &'a MuxSettings,
    ) -> Self {
        Self {
            primary,
            audio_tracks,
            output_path,
            settings,
        }
    }

    /// Build the complete ffmpeg argument list.
    pub fn build(&self) -> Vec<String> {
        let mut tokens = Vec::new();

        if self.settings.overwrite {
            tokens.push("-y".to_string());
        }

        self.add_inputs(&mut tokens);
        self.add_maps(&mut tokens);
        self.add_metadata(&mut tokens);

        // Stream copy, no re-encode
        tokens.push("-c".to_string());
        tokens.push("copy".to_string());
        tokens.push(self.output_path.to_string_lossy().to_string());

        tokens
    }

    fn add_inputs(&self, tokens: &mut Vec<String>) {
        tokens.push("-i".to_string());
        tokens.push(self.primary.to_string_lossy().to_string());

        for track in self.audio_tracks {
            tokens.push("-i".to_string());
            tokens.push(track.path.to_string_lossy().to_string());
        }
    }

    fn add_maps(&self, tokens: &mut Vec<String>) {
        tokens.push("-map".to_string());
        tokens.push("0:v:0".to_string());
        tokens.push("-map".to_string());
        tokens.push("0:a:0".to_string());

        for input in 1..=self.audio_tracks.len() {
            tokens.push("-map".to_string());
            tokens.push(format!("{}:a:0", input));
        }
    }

    fn add_metadata(&self, tokens: &mut Vec<String>) {
        push_stream_tags(tokens, 0, PRIMARY_LANGUAGE_CODE, PRIMARY_LANGUAGE_NAME);

        for (i, track) in self.audio_tracks.iter().enumerate() {
            let code = languages::iso639_2(&track.lang_id);
            let name = languages::display_name(&track.lang_id);
            push_stream_tags(tokens, i + 1, &code, &name);
        }
    }
}

fn push_stream_tags(tokens: &mut Vec<String>, stream: usize, code: &str, name: &str) {
    let key = format!("-metadata:s:a:{}", stream);
    tokens.push(key.clone());
    tokens.push(format!("language={}", code));
    tokens.push(key);
    tokens.push(format!("title={}", name));
}

/// Format tokens for pretty display (one option per line).
pub fn format_tokens_pretty(tokens: &[String]) -> String {
    let mut result = String::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];

        if token.starts_with('-') && i + 1 < tokens.len() && !tokens[i + 1].starts_with('-') {
            result.push_str(&format!("{} {} \\\n", token, tokens[i + 1]));
            i += 2;
        } else {
            result.push_str(&format!("{} \\\n", token));
            i += 1;
        }
    }

    result
}
