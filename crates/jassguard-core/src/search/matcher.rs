use crate::error::Result;
use crate::search::model::ByteSpan;

use grep_matcher::Matcher;
use grep_regex::{RegexMatcher as GrepMatcher, RegexMatcherBuilder};

/// Options for a pattern query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    /// Case-insensitive ("i")
    pub case_insensitive: bool,
    /// Anchor-multiline ("m"): ^/$ match at internal line boundaries
    pub multi_line: bool,
    /// Search the whitespace-normalized text and translate matches back.
    /// When off, the pattern runs verbatim against the original text.
    pub ignore_whitespace: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            multi_line: false,
            ignore_whitespace: true,
        }
    }
}

impl SearchOptions {
    /// Case-insensitive, line-anchored search; what anchor lookups use.
    pub fn lines_ci() -> Self {
        Self {
            case_insensitive: true,
            multi_line: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    #[must_use]
    pub fn multi_line(mut self, yes: bool) -> Self {
        self.multi_line = yes;
        self
    }

    #[must_use]
    pub fn ignore_whitespace(mut self, yes: bool) -> Self {
        self.ignore_whitespace = yes;
        self
    }
}

/// Thin wrapper around `grep_regex::RegexMatcher`.
pub struct RegexMatcher {
    inner: GrepMatcher,
}

impl RegexMatcher {
    /// Compile a regex pattern into a matcher. `.` never crosses a line break.
    pub fn compile(pattern: &str, opts: &SearchOptions) -> Result<Self> {
        let mut b = RegexMatcherBuilder::new();
        b.case_insensitive(opts.case_insensitive)
            .unicode(true)
            .multi_line(opts.multi_line)
            .dot_matches_new_line(false);

        let matcher = b.build(pattern)?;
        Ok(Self { inner: matcher })
    }

    /// Enumerate non-overlapping matches in `haystack`, left to right.
    ///
    /// Calls `on_match(span)` for each occurrence. Return `false`
    /// from the closure to stop early.
    pub fn find_spans(
        &self,
        haystack: &[u8],
        mut on_match: impl FnMut(ByteSpan) -> bool,
    ) -> Result<()> {
        self.inner.find_iter(haystack, |m| {
            on_match(ByteSpan {
                start: m.start(),
                end: m.end(),
            })
        })?;
        Ok(())
    }

    /// Leftmost match in `haystack`, if any.
    pub fn find_first(&self, haystack: &[u8]) -> Result<Option<ByteSpan>> {
        let found = self.inner.find(haystack)?;
        Ok(found.map(|m| ByteSpan {
            start: m.start(),
            end: m.end(),
        }))
    }

    /// Access the underlying `grep_regex::RegexMatcher` if needed.
    #[inline]
    pub fn inner(&self) -> &GrepMatcher {
        &self.inner
    }
}
