//! Whitespace-normalized view of a script plus the coordinate maps between
//! that view and the original text.
//!
//! The searchable text drops every whitespace character except line breaks,
//! and collapses each run of `\n`/`\r` (any mix, any length) into a single
//! `\n`. Two plain index arrays translate positions both ways:
//!
//! - `forward[i]`: original byte for searchable byte `i`. A collapsed run
//!   maps to the *last* byte of the run, so a match ending on the synthetic
//!   `\n` covers the whole original run when sliced back.
//! - `reverse[k]`: searchable byte that original byte `k` belongs to. Dropped
//!   whitespace points at the next kept byte; every byte of a newline run
//!   points at that run's synthetic `\n`.
//!
//! The structure is an immutable snapshot; edits rebuild it from scratch.

use std::iter;

use crate::error::{Error, Result};
use crate::search::lines::LineView;
use crate::search::model::ByteSpan;

#[inline]
fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

#[derive(Debug, Clone)]
pub struct NormalizedText {
    original: String,
    searchable: String,
    forward: Vec<usize>,
    reverse: Vec<usize>,
    original_lines: LineView,
    searchable_lines: LineView,
}

impl NormalizedText {
    /// Build every derived structure in a single pass over `original`.
    ///
    /// Fails with `InvalidInput` when the text is empty or all whitespace.
    pub fn build(original: String) -> Result<Self> {
        if original.trim().is_empty() {
            return Err(Error::InvalidInput);
        }

        let mut searchable = String::with_capacity(original.len());
        let mut forward = Vec::with_capacity(original.len());
        let mut reverse = Vec::with_capacity(original.len());

        let mut chars = original.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let j = searchable.len();
            if is_line_break(c) {
                reverse.push(j);
                let mut last = i;
                while let Some(&(k, next)) = chars.peek() {
                    if !is_line_break(next) {
                        break;
                    }
                    reverse.push(j);
                    last = k;
                    chars.next();
                }
                searchable.push('\n');
                forward.push(last);
            } else if c.is_whitespace() {
                reverse.extend(iter::repeat(j).take(c.len_utf8()));
            } else {
                for b in 0..c.len_utf8() {
                    forward.push(i + b);
                    reverse.push(j + b);
                }
                searchable.push(c);
            }
        }

        debug_assert_eq!(forward.len(), searchable.len());
        debug_assert_eq!(reverse.len(), original.len());

        let original_lines = LineView::build(&original);
        let searchable_lines = LineView::build(&searchable);

        tracing::debug!(
            original_len = original.len(),
            searchable_len = searchable.len(),
            lines = original_lines.line_count(),
            "normalized script text"
        );

        Ok(Self {
            original,
            searchable,
            forward,
            reverse,
            original_lines,
            searchable_lines,
        })
    }

    #[inline]
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[inline]
    #[must_use]
    pub fn searchable(&self) -> &str {
        &self.searchable
    }

    /// Searchable byte -> original byte.
    #[inline]
    #[must_use]
    pub fn forward_map(&self) -> &[usize] {
        &self.forward
    }

    /// Original byte -> searchable byte.
    #[inline]
    #[must_use]
    pub fn reverse_map(&self) -> &[usize] {
        &self.reverse
    }

    #[inline]
    #[must_use]
    pub fn original_lines(&self) -> &LineView {
        &self.original_lines
    }

    #[inline]
    #[must_use]
    pub fn searchable_lines(&self) -> &LineView {
        &self.searchable_lines
    }

    /// Translate a searchable span back into original coordinates.
    ///
    /// The end is inclusive of the original byte behind `span.end - 1`, so a
    /// trailing synthetic `\n` widens to the whole newline run. Empty spans
    /// sit on the next kept byte (or the end of text).
    #[must_use]
    pub fn to_original(&self, span: ByteSpan) -> ByteSpan {
        if span.is_empty() {
            let at = self
                .forward
                .get(span.start)
                .copied()
                .unwrap_or(self.original.len());
            return ByteSpan { start: at, end: at };
        }
        let start = self.forward[span.start];
        let last = self.forward[span.end - 1];
        ByteSpan {
            start,
            end: last + 1,
        }
    }

    /// Translate an original offset into the searchable position a forward
    /// search should resume from, rounded up to a character boundary.
    ///
    /// `offset == original.len()` maps to the end of the searchable text.
    pub fn to_searchable(&self, offset: usize) -> Result<usize> {
        if offset > self.original.len() {
            return Err(Error::OutOfRange {
                offset,
                len: self.original.len(),
            });
        }
        let mut pos = self
            .reverse
            .get(offset)
            .copied()
            .unwrap_or(self.searchable.len());
        while !self.searchable.is_char_boundary(pos) {
            pos += 1;
        }
        Ok(pos)
    }

    /// Give back the original text, dropping the derived structures.
    #[inline]
    pub fn into_original(self) -> String {
        self.original
    }
}
