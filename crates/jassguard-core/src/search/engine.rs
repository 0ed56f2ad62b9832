//! `ScriptSearch`: whitespace-insensitive search over a script, with
//! matches reported in original-text coordinates, plus in-place insertion.

use memchr::memmem;

use crate::error::{Error, Result};
use crate::search::index::NormalizedText;
use crate::search::lines::{scan_lines, LineMode};
use crate::search::matcher::{RegexMatcher, SearchOptions};
use crate::search::model::{ByteSpan, Match};

/// Search engine over one script.
///
/// All derived state lives in a single [`NormalizedText`] snapshot that is
/// rebuilt wholesale on every [`insert`](Self::insert). Queries take `&self`
/// and may run concurrently; an insert needs `&mut self`, so borrowed query
/// results cannot outlive it.
#[derive(Debug, Clone)]
pub struct ScriptSearch {
    index: NormalizedText,
}

/// Literal spaces are removed from patterns run against the normalized text,
/// since that text has none.
fn strip_spaces(pattern: &str) -> Result<String> {
    if pattern.trim().is_empty() {
        return Err(Error::InvalidPattern);
    }
    let stripped = pattern.replace(' ', "");
    if stripped.is_empty() {
        return Err(Error::InvalidPattern);
    }
    Ok(stripped)
}

impl ScriptSearch {
    /// Index `text`. Fails with `InvalidInput` on empty or blank text.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        Ok(Self {
            index: NormalizedText::build(text.into())?,
        })
    }

    /// The live original text.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        self.index.original()
    }

    #[inline]
    pub fn into_text(self) -> String {
        self.index.into_original()
    }

    /// The normalized snapshot backing this engine.
    #[inline]
    #[must_use]
    pub fn index(&self) -> &NormalizedText {
        &self.index
    }

    /// Every non-overlapping match, in order of occurrence.
    ///
    /// Spans that start or end inside a multi-byte character are skipped.
    pub fn find_all(&self, pattern: &str, opts: &SearchOptions) -> Result<Vec<Match>> {
        let mut out = Vec::new();
        self.search_from(pattern, 0, opts, |m| {
            out.push(m);
            true
        })?;
        Ok(out)
    }

    /// The first match, if any.
    pub fn find_first(&self, pattern: &str, opts: &SearchOptions) -> Result<Option<Match>> {
        self.find_first_from(pattern, 0, opts)
    }

    /// The first match starting at or after original offset `from`.
    ///
    /// `from` is translated through the reverse map, so whitespace between
    /// `from` and the next token is skipped. The text is searched as if it
    /// began at that point: a non-multi-line `^` anchors there.
    pub fn find_first_from(
        &self,
        pattern: &str,
        from: usize,
        opts: &SearchOptions,
    ) -> Result<Option<Match>> {
        let mut first = None;
        self.search_from(pattern, from, opts, |m| {
            first = Some(m);
            false
        })?;
        Ok(first)
    }

    /// Feed matches at or after original offset `from` to `on_match` until it
    /// returns `false`.
    fn search_from(
        &self,
        pattern: &str,
        from: usize,
        opts: &SearchOptions,
        mut on_match: impl FnMut(Match) -> bool,
    ) -> Result<()> {
        if opts.ignore_whitespace {
            let re = RegexMatcher::compile(&strip_spaces(pattern)?, opts)?;
            let base = self.index.to_searchable(from)?;
            let rest = &self.index.searchable()[base..];
            re.find_spans(rest.as_bytes(), |span| match self.translate(span, base) {
                Some(m) => on_match(m),
                None => true,
            })
        } else {
            let re = compile_raw(pattern, opts)?;
            let text = self.text();
            if from > text.len() {
                return Err(Error::OutOfRange {
                    offset: from,
                    len: text.len(),
                });
            }
            if !text.is_char_boundary(from) {
                return Err(Error::NotCharBoundary(from));
            }
            re.find_spans(text[from..].as_bytes(), |span| {
                let range = (from + span.start)..(from + span.end);
                match text.get(range.clone()) {
                    Some(value) => on_match(Match::new(range.start, value)),
                    None => true,
                }
            })
        }
    }

    /// Lines containing `needle`, as they appear in the view `mode` scans.
    pub fn contains_line(&self, needle: &str, mode: LineMode) -> Result<Vec<&str>> {
        self.contains_any_line(&[needle], mode)
    }

    /// Lines containing any of `needles`; a line is reported once per
    /// needle it contains.
    pub fn contains_any_line<S: AsRef<str>>(
        &self,
        needles: &[S],
        mode: LineMode,
    ) -> Result<Vec<&str>> {
        let prepared = needles
            .iter()
            .map(|n| mode.prepare_needle(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let finders: Vec<memmem::Finder<'_>> = prepared
            .iter()
            .map(|n| memmem::Finder::new(n.as_bytes()))
            .collect();

        let hits = match mode {
            LineMode::IgnoreWhitespace => scan_lines(
                self.index.searchable(),
                self.index.searchable_lines(),
                &finders,
            ),
            LineMode::Exact => {
                scan_lines(self.index.original(), self.index.original_lines(), &finders)
            }
        };
        Ok(hits)
    }

    /// Insert `text` at original byte `offset` and rebuild the index.
    ///
    /// Every previously returned [`Match`] is stale afterwards. On error the
    /// engine is left exactly as it was.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<()> {
        let current = self.index.original();
        if offset > current.len() {
            return Err(Error::OutOfRange {
                offset,
                len: current.len(),
            });
        }
        if !current.is_char_boundary(offset) {
            return Err(Error::NotCharBoundary(offset));
        }

        let mut combined = String::with_capacity(current.len() + text.len());
        combined.push_str(&current[..offset]);
        combined.push_str(text);
        combined.push_str(&current[offset..]);

        self.index = NormalizedText::build(combined)?;
        tracing::debug!(offset, inserted = text.len(), "rebuilt search index");
        Ok(())
    }

    /// Map a searchable-space span found at `base` back to a `Match`.
    fn translate(&self, span: ByteSpan, base: usize) -> Option<Match> {
        let abs = ByteSpan {
            start: base + span.start,
            end: base + span.end,
        };
        let searchable = self.index.searchable();
        if !searchable.is_char_boundary(abs.start) || !searchable.is_char_boundary(abs.end) {
            return None;
        }
        let orig = self.index.to_original(abs);
        Some(Match::new(orig.start, &self.text()[orig.to_range()]))
    }
}

fn compile_raw(pattern: &str, opts: &SearchOptions) -> Result<RegexMatcher> {
    if pattern.trim().is_empty() {
        return Err(Error::InvalidPattern);
    }
    RegexMatcher::compile(pattern, opts)
}
