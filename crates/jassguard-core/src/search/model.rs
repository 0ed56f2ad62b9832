//! Coordinate primitives shared by the search engine.
//!
//! ByteSpan: half-open byte range in *original* text coordinates
//! Match: one located occurrence plus its exact original substring

use std::ops::Range;

use crate::error::{Error, Result};

/// Half-open absolute byte range `[start, end)`.
///
/// Invariants:
/// - Units are **bytes**, not chars.
/// - `start <= end` always holds (empty spans are allowed).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct ByteSpan {
    pub start: usize,
    pub end: usize,
}

impl ByteSpan {
    /// Create a span if `end >= start`; returns `OutOfRange` if not.
    #[inline]
    pub fn try_new(start: usize, end: usize) -> Result<Self> {
        if end < start {
            return Err(Error::OutOfRange {
                offset: start,
                len: end,
            });
        }
        Ok(Self { start, end })
    }

    /// Length in bytes: `end - start` (0 for empty).
    #[inline]
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True if the span is empty (start == end).
    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Convert to `Range<usize>`.
    #[inline]
    #[must_use]
    pub fn to_range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<ByteSpan> for Range<usize> {
    #[inline]
    fn from(s: ByteSpan) -> Self {
        s.start..s.end
    }
}

/// One occurrence found by the engine, expressed in original-text coordinates.
///
/// `value` is exactly `text[span]`, whitespace and line endings included.
/// A `Match` refers to the text as it was when the query ran; any later
/// insertion makes its offsets stale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    span: ByteSpan,
    value: String,
}

impl Match {
    #[inline]
    pub(crate) fn new(start: usize, value: &str) -> Self {
        Self {
            span: ByteSpan {
                start,
                end: start + value.len(),
            },
            value: value.to_owned(),
        }
    }

    /// Byte offset of the first matched byte in the original text.
    #[inline]
    #[must_use]
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// Byte offset one past the last matched byte.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.span.end
    }

    #[inline]
    #[must_use]
    pub fn span(&self) -> ByteSpan {
        self.span
    }

    /// The exact original substring.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Consume the match, keeping only the substring.
    #[inline]
    pub fn into_value(self) -> String {
        self.value
    }
}
