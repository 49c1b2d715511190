//! POSIX shell quoting, for echoing commands so they can be re-run by hand.

use std::ffi::OsStr;

/// Quote a single argument for a POSIX shell.
pub fn escape<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    if s.is_empty() {
        return "''".to_string();
    }
    if s.bytes().all(|b| {
        matches!(b,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' |
            b'_' | b'-' | b'.' | b'/' | b':' | b'@' | b'%' | b'+' | b'=' | b','
        )
    }) {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str("'\"'\"'");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

/// Join a program and its arguments into one quoted command line.
pub fn join_command<P, I, S>(program: P, args: I) -> String
where
    P: AsRef<OsStr>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parts = vec![escape(program.as_ref().to_string_lossy())];
    parts.extend(args.into_iter().map(escape));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_safe_words_alone() {
        assert_eq!(escape("bestvideo+bestaudio/best"), "bestvideo+bestaudio/best");
        assert_eq!(escape("language=pol"), "language=pol");
    }

    #[test]
    fn quotes_spaces_and_quotes() {
        assert_eq!(escape("My Series/Episode 1.mkv"), "'My Series/Episode 1.mkv'");
        assert_eq!(escape("it's"), "'it'\"'\"'s'");
        assert_eq!(escape(""), "''");
    }

    #[test]
    fn joins_command() {
        assert_eq!(
            join_command("ffmpeg", ["-i", "a b.mkv", "-c", "copy"]),
            "ffmpeg -i 'a b.mkv' -c copy"
        );
    }
}
