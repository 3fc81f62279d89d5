//! Source text spans.

use std::fmt;
use std::ops::Range;

use thiserror::Error;

/// Error when a byte range does not fit the `u32` offsets of a [`TextSpan`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextSpanError {
    #[error("span start {0} (0x{0:X}) exceeds u32::MAX")]
    StartTooLarge(usize),
    #[error("span end {0} (0x{0:X}) exceeds u32::MAX")]
    EndTooLarge(usize),
}

/// Half-open byte range `start..end` into source text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct TextSpan {
    pub start: u32,
    pub end: u32,
}

impl TextSpan {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        TextSpan { start, end }
    }

    /// Span of `len` bytes starting at `start`.
    #[inline]
    pub const fn at(start: u32, len: u32) -> Self {
        TextSpan {
            start,
            end: start + len,
        }
    }

    /// Convert a byte range, failing if either end exceeds `u32::MAX`.
    pub fn try_from_range(range: Range<usize>) -> Result<Self, TextSpanError> {
        let start =
            u32::try_from(range.start).map_err(|_| TextSpanError::StartTooLarge(range.start))?;
        let end = u32::try_from(range.end).map_err(|_| TextSpanError::EndTooLarge(range.end))?;
        Ok(TextSpan { start, end })
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    #[inline]
    pub fn contains_span(&self, other: TextSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest span covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: TextSpan) -> TextSpan {
        TextSpan {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end)
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Byte length of `text` as a `u32` offset.
///
/// Syntax trees address text with `u32`; lengths past that saturate.
#[inline]
pub fn text_len(text: &str) -> u32 {
    u32::try_from(text.len()).unwrap_or(u32::MAX)
}
