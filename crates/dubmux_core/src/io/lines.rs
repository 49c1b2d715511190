//! Line splitting for tool output.
//!
//! yt-dlp and ffmpeg redraw progress with bare carriage returns when their
//! output is not a terminal, so `BufRead::lines` would hold a whole
//! download's worth of progress in one "line". This splits on `\n`, `\r`
//! and `\r\n` alike and decodes lossily.

use std::io::{self, BufRead};

/// Iterator over console lines of a reader.
///
/// Yields lines without their terminator.
pub struct ConsoleLines<R> {
    reader: R,
    /// Previous segment ended with `\r`; a following `\n` closes the same line.
    after_cr: bool,
}

impl<R: BufRead> ConsoleLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            after_cr: false,
        }
    }

    /// Read up to and including the next `\n` or `\r`.
    fn read_segment(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        let mut read = 0;
        loop {
            let available = match self.reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(read);
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(i) => {
                    buf.extend_from_slice(&available[..=i]);
                    self.reader.consume(i + 1);
                    return Ok(read + i + 1);
                }
                None => {
                    let n = available.len();
                    buf.extend_from_slice(available);
                    self.reader.consume(n);
                    read += n;
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for ConsoleLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut buf = Vec::new();
            match self.read_segment(&mut buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }

            if self.after_cr && buf == b"\n" {
                self.after_cr = false;
                continue;
            }

            self.after_cr = buf.last() == Some(&b'\r');
            if matches!(buf.last(), Some(b'\n') | Some(b'\r')) {
                buf.pop();
            }

            return Some(Ok(String::from_utf8_lossy(&buf).into_owned()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn split(input: &[u8]) -> Vec<String> {
        ConsoleLines::new(Cursor::new(input.to_vec()))
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn splits_on_newlines() {
        assert_eq!(split(b"a\nb\n"), vec!["a", "b"]);
    }

    #[test]
    fn keeps_unterminated_tail() {
        assert_eq!(split(b"a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn splits_on_carriage_returns() {
        assert_eq!(
            split(b"frame=  1\rframe=  2\rframe=  3\ndone\n"),
            vec!["frame=  1", "frame=  2", "frame=  3", "done"]
        );
    }

    #[test]
    fn crlf_is_one_terminator() {
        assert_eq!(split(b"a\r\nb\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn keeps_blank_lines() {
        assert_eq!(split(b"a\n\nb\n"), vec!["a", "", "b"]);
    }

    #[test]
    fn replaces_invalid_utf8() {
        assert_eq!(split(b"ok \xff\n"), vec!["ok \u{fffd}"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(split(b"").is_empty());
    }
}
