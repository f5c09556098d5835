//! Log sanitization for personal health information.
//!
//! Formatted log lines pass through [`SanitizingMakeWriter`] before they hit
//! the sink. Patterns covered:
//! - `name=` / `patient=` style key-value pairs
//! - Email addresses
//! - Phone numbers
//! - SSN-like identifiers
//!
//! This is a fallback. Call sites should log counts and ids, or wrap personal
//! values in [`crate::domain::Redacted`].

use std::io::Write;
use std::sync::OnceLock;

use regex::{Regex, RegexSet};
use tracing_subscriber::fmt::MakeWriter;

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

/// Lines longer than this are cut before scanning.
const MAX_LINE_BYTES: usize = 8 * 1024;

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

struct Patterns {
    set: RegexSet,
    rules: Vec<Rule>,
}

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| {
        let table: [(&str, &str); 4] = [
            (
                r#"(?i)\b(name|patient)\s*[=:]\s*(?:"[^"]*"|[^\s,]+)"#,
                "$1=[REDACTED]",
            ),
            (
                r"(?i)\b[a-z0-9._%+-]{1,64}@(?:[a-z0-9-]{1,63}\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            (
                r"\b(?:\+?\d{1,2}[-.\s]?)?\(?\d{3}\)?[-.\s]\d{3}[-.\s]\d{4}\b",
                "[REDACTED-PHONE]",
            ),
            (r"\b\d{3}-\d{2}-\d{4}\b", "[REDACTED-SSN]"),
        ];

        let set = RegexSet::new(table.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let rules = table
            .iter()
            .map(|(p, replacement)| Rule {
                regex: Regex::new(p).expect("Valid regex"),
                replacement,
            })
            .collect();

        Patterns { set, rules }
    })
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Replace personal identifiers in `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    let (prefix, truncated) = truncate_to_char_boundary(input, MAX_LINE_BYTES);
    let patterns = patterns();

    let mut out = prefix.to_string();
    for idx in patterns.set.matches(prefix).into_iter() {
        let rule = &patterns.rules[idx];
        out = rule.regex.replace_all(&out, rule.replacement).into_owned();
    }

    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// Writer factory that sanitizes every formatted line.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W: Write> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: Write> SanitizingWriter<W> {
    fn write_line(&mut self, line: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(line);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_line(&line)?;
        }
        Ok(())
    }
}

impl<W: Write> Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A formatter that never emits a newline must not grow the buffer forever.
        if self.buffer.len() > MAX_LINE_BYTES * 2 {
            let pending = std::mem::take(&mut self.buffer);
            self.write_line(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_line(&pending)?;
        }
        self.inner.flush()
    }
}

impl<W: Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            buffer: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name_pairs() {
        let out = sanitize("profile saved name=\"John Doe\" age=35");
        assert!(out.contains("name=[REDACTED]"));
        assert!(!out.contains("John"));
        assert!(out.contains("age=35"));

        let out = sanitize("patient: jdoe updated");
        assert!(out.contains("patient=[REDACTED]"));
        assert!(!out.contains("jdoe"));
    }

    #[test]
    fn test_sanitize_email_and_phone() {
        let out = sanitize("contact jane.doe@clinic.org or 555-123-4567");
        assert!(out.contains("[REDACTED-EMAIL]"));
        assert!(out.contains("[REDACTED-PHONE]"));
        assert!(!out.contains("clinic.org"));
    }

    #[test]
    fn test_sanitize_ssn() {
        let out = sanitize("ssn 123-45-6789 on file");
        assert!(out.contains("[REDACTED-SSN]"));
        assert!(!out.contains("6789"));
    }

    #[test]
    fn test_sanitize_leaves_clinical_numbers() {
        let line = "vitals recorded systolic=120 diastolic=80 pulse=72 id=1760781234567";
        assert_eq!(sanitize(line), line);
    }

    #[test]
    fn test_sanitize_truncates() {
        let long = "a".repeat(MAX_LINE_BYTES + 10);
        assert!(sanitize(&long).ends_with("[TRUNCATED]"));
    }

    #[test]
    fn test_writer_sanitizes_lines() {
        let mut sink: Vec<u8> = Vec::new();
        {
            let mut writer = SanitizingWriter {
                inner: &mut sink,
                buffer: Vec::new(),
            };
            writer.write_all(b"first name=Alice\nsecond ").unwrap();
            writer.write_all(b"line\n").unwrap();
            writer.flush().unwrap();
        }
        let text = String::from_utf8(sink).unwrap();
        assert_eq!(text, "first name=[REDACTED]\nsecond line\n");
    }
}
