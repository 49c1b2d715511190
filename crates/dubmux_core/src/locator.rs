//! Derivation of per-language audio playlist URLs.
//!
//! The site serves every audio rendition next to the master playlist, so
//! `https://host/path/playlist.m3u8` has a Polish track at
//! `https://host/path/audio_pl.m3u8`. Nothing here checks that the
//! derived playlist exists; yt-dlp reports that when it is invoked.

use thiserror::Error;
use url::Url;

/// Errors from URL derivation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// The primary URL could not be parsed.
    #[error("Invalid URL '{url}': {message}")]
    Parse { url: String, message: String },

    /// The URL has no hierarchical path (e.g. `data:` or `mailto:`).
    #[error("URL '{0}' has no path segments to replace")]
    NoPath(String),
}

/// Build the playlist URL for an audio track.
///
/// Replaces the last path segment of `primary` with `<lang_id>.m3u8` and
/// keeps scheme, host, port, credentials, query and fragment.
pub fn derive_audio_url(primary: &str, lang_id: &str) -> Result<Url, LocatorError> {
    let mut url = Url::parse(primary).map_err(|e| LocatorError::Parse {
        url: primary.to_string(),
        message: e.to_string(),
    })?;

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| LocatorError::NoPath(primary.to_string()))?;
        segments.pop();
        segments.push(&format!("{lang_id}.m3u8"));
    }

    tracing::debug!("Derived {} audio URL: {}", lang_id, url);
    Ok(url)
}

/// Check that a primary URL can have audio URLs derived from it.
pub fn validate_primary(primary: &str) -> Result<(), LocatorError> {
    derive_audio_url(primary, "probe").map(|_| ())
}
