//! Line views and the line-level containment scanner.
//!
//! Coarse "does any line contain X" checks return whole lines rather than
//! translated spans. Lines are split on `\n` only, so original lines may keep
//! a trailing `\r`.

use std::borrow::Cow;

use memchr::{memchr_iter, memmem};

use crate::error::{Error, Result};
use crate::search::model::ByteSpan;

/// Which view of the text a containment query scans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineMode {
    /// Scan the whitespace-free, newline-collapsed lines. Every whitespace
    /// character is removed from the needle too, so spacing never matters.
    #[default]
    IgnoreWhitespace,
    /// Scan the original lines with the needle verbatim.
    Exact,
}

impl LineMode {
    /// Shape `needle` for this mode; empty needles are rejected.
    pub fn prepare_needle<'n>(self, needle: &'n str) -> Result<Cow<'n, str>> {
        let prepared = match self {
            LineMode::Exact => Cow::Borrowed(needle),
            LineMode::IgnoreWhitespace if needle.contains(char::is_whitespace) => {
                Cow::Owned(needle.chars().filter(|c| !c.is_whitespace()).collect())
            }
            LineMode::IgnoreWhitespace => Cow::Borrowed(needle),
        };
        if prepared.is_empty() {
            return Err(Error::InvalidPattern);
        }
        Ok(prepared)
    }
}

/// Content spans of each `\n`-separated line (terminator excluded).
///
/// Always holds at least one line; text ending in `\n` yields a trailing
/// empty line.
#[derive(Debug, Clone)]
pub struct LineView {
    spans: Vec<ByteSpan>,
}

impl LineView {
    /// Build by scanning for '\n' only. Rebuild only when the text changes.
    pub fn build(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut spans = Vec::with_capacity(16);
        let mut start = 0;
        for nl in memchr_iter(b'\n', bytes) {
            spans.push(ByteSpan { start, end: nl });
            start = nl + 1;
        }
        spans.push(ByteSpan {
            start,
            end: bytes.len(),
        });
        Self { spans }
    }

    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.spans.len()
    }

    #[inline]
    #[must_use]
    pub fn spans(&self) -> &[ByteSpan] {
        &self.spans
    }

    /// Iterate the lines of `text`, which must be the text this view was built from.
    pub fn lines<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.spans.iter().map(move |s| &text[s.to_range()])
    }
}

/// Collect every line of `text` containing a needle, once per needle hit.
///
/// Order is line-major, then needle order, so a line containing two needles
/// appears twice in a row.
pub(crate) fn scan_lines<'a>(
    text: &'a str,
    view: &'a LineView,
    needles: &[memmem::Finder<'_>],
) -> Vec<&'a str> {
    let mut hits = Vec::new();
    for line in view.lines(text) {
        for finder in needles {
            if finder.find(line.as_bytes()).is_some() {
                hits.push(line);
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_view_matches_split() {
        let text = "a\r\nbb\n\nc\n";
        let view = LineView::build(text);
        let lines: Vec<&str> = view.lines(text).collect();
        assert_eq!(lines, text.split('\n').collect::<Vec<_>>());
        assert_eq!(view.line_count(), 5);
    }

    #[test]
    fn test_prepare_needle_strips_all_whitespace() {
        let n = LineMode::IgnoreWhitespace
            .prepare_needle("Force Add\tPlayer")
            .unwrap();
        assert_eq!(n, "ForceAddPlayer");

        let n = LineMode::Exact.prepare_needle("-kill ").unwrap();
        assert_eq!(n, "-kill ");
    }

    #[test]
    fn test_prepare_needle_rejects_empty() {
        assert!(matches!(
            LineMode::IgnoreWhitespace.prepare_needle(" \t"),
            Err(Error::InvalidPattern)
        ));
        assert!(matches!(
            LineMode::Exact.prepare_needle(""),
            Err(Error::InvalidPattern)
        ));
    }

    #[test]
    fn test_scan_lines_reports_once_per_needle() {
        let text = "foo bar\nbaz\nbar foo";
        let view = LineView::build(text);
        let finders = [memmem::Finder::new("foo"), memmem::Finder::new("bar")];
        let hits = scan_lines(text, &view, &finders);
        assert_eq!(hits, vec!["foo bar", "foo bar", "bar foo", "bar foo"]);
    }
}
