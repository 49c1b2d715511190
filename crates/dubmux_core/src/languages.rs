//! Compiled-in table of alternate audio tracks.
//!
//! Track identifiers are the playlist names the streaming site uses for
//! its per-language audio renditions (`audio_pl.m3u8`, `audio_de.m3u8`, ...).
//! Each one maps to a display name (used as the Matroska track title) and
//! an ISO 639-2 code (used as the track language tag).

use std::borrow::Cow;

/// One entry of the language table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageInfo {
    /// Track identifier, e.g. `audio_pl`.
    pub id: &'static str,
    /// Human-readable name, e.g. `Polish`.
    pub name: &'static str,
    /// Three-letter language code for container metadata.
    pub code: Option<&'static str>,
}

const fn lang(id: &'static str, name: &'static str, code: Option<&'static str>) -> LanguageInfo {
    LanguageInfo { id, name, code }
}

/// Every audio track the site is known to publish, in display order.
pub static LANGUAGES: &[LanguageInfo] = &[
    lang("audio_ar", "Arabic", Some("ara")),
    lang("audio_cs", "Czech", Some("ces")),
    lang("audio_da", "Danish", Some("dan")),
    lang("audio_nl", "Dutch", Some("nld")),
    // No ffmpeg code configured; falls back to "aud".
    lang("audio_en_descriptive", "English (Descriptive)", None),
    lang("audio_fi", "Finnish", Some("fin")),
    lang("audio_fr", "French", Some("fre")),
    lang("audio_de", "German", Some("ger")),
    lang("audio_he", "Hebrew", Some("heb")),
    lang("audio_it", "Italian", Some("ita")),
    lang("audio_cmn-TW", "Mandarin Chinese (Taiwan)", Some("chi")),
    lang("audio_nb", "Norwegian Bokmal", Some("nor")),
    lang("audio_pl", "Polish", Some("pol")),
    lang("audio_pt-BR", "Portuguese (Brazil)", Some("por")),
    lang("audio_pt-PT", "Portuguese (Portugal)", Some("por")),
    lang("audio_ro", "Romanian", Some("ron")),
    lang("audio_ru", "Russian", Some("rus")),
    lang("audio_es-419", "Spanish (Latin America)", Some("spa")),
    lang("audio_es-ES", "Spanish (Spain)", Some("spa")),
    lang("audio_sv", "Swedish", Some("swe")),
    lang("audio_th", "Thai", Some("tha")),
    lang("audio_tr", "Turkish", Some("tur")),
    lang("audio_uk", "Ukrainian", Some("ukr")),
];

/// Language tag for the primary (default) audio stream.
pub const PRIMARY_LANGUAGE_CODE: &str = "eng";

/// Track title for the primary (default) audio stream.
pub const PRIMARY_LANGUAGE_NAME: &str = "English";

/// Look up a table entry by identifier.
pub fn lookup(id: &str) -> Option<&'static LanguageInfo> {
    LANGUAGES.iter().find(|info| info.id == id)
}

/// Whether the identifier is present in the table.
pub fn is_known(id: &str) -> bool {
    lookup(id).is_some()
}

/// Display name for an identifier, or the identifier itself if unknown.
pub fn display_name(id: &str) -> Cow<'_, str> {
    match lookup(id) {
        Some(info) => Cow::Borrowed(info.name),
        None => Cow::Borrowed(id),
    }
}

/// Three-letter code for an identifier.
///
/// Unknown identifiers (and known ones without a code) fall back to the
/// first three characters of the identifier.
pub fn iso639_2(id: &str) -> Cow<'_, str> {
    match lookup(id).and_then(|info| info.code) {
        Some(code) => Cow::Borrowed(code),
        None => Cow::Owned(id.chars().take(3).collect()),
    }
}
