//! Tokens, spans, and the scanner state carried across line boundaries.

use std::fmt;
use std::ops::Range;

use tint_lang::{SubStyle, TokenKind};

/// Convert a buffer offset to `u32`. Buffers are limited to `u32::MAX` bytes.
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    reason = "buffer length is checked against u32::MAX on entry"
)]
pub fn offset(n: usize) -> u32 {
    debug_assert!(u32::try_from(n).is_ok(), "offset {n} exceeds u32");
    n as u32
}

/// Half-open byte range `[start, end)`.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "inverted span {start}..{end}");
        Span { start, end }
    }

    #[inline]
    pub fn from_range(range: Range<usize>) -> Self {
        Span::new(offset(range.start), offset(range.end))
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn contains(&self, pos: u32) -> bool {
        self.start <= pos && pos < self.end
    }

    /// `true` when the two ranges share at least one byte.
    #[inline]
    pub fn overlaps(&self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Move both ends by `delta` bytes.
    #[inline]
    #[must_use]
    pub fn shifted(self, delta: i64) -> Self {
        Span {
            start: shift(self.start, delta),
            end: shift(self.end, delta),
        }
    }

    #[inline]
    pub fn to_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Shift an offset by a signed delta.
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "shifted offsets stay within the u32 buffer"
)]
pub fn shift(pos: u32, delta: i64) -> u32 {
    let moved = i64::from(pos) + delta;
    debug_assert!((0..=i64::from(u32::MAX)).contains(&moved), "shift out of range");
    moved as u32
}

/// A classified byte range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub span: Span,
    pub kind: TokenKind,
    pub sub: SubStyle,
}

impl Token {
    #[inline]
    pub fn new(span: Span, kind: TokenKind, sub: SubStyle) -> Self {
        Token { span, kind, sub }
    }
}

/// Multi-line construct open at a line boundary.
///
/// Equality of this value at the start of a line is the convergence test for
/// incremental re-lexing: two scans entering a line in equal states produce
/// the same tokens from there on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScanState {
    #[default]
    Normal,
    /// Inside a block comment. `depth` is at least 1.
    BlockComment { depth: u16 },
    /// Inside a string that continues past the end of a line.
    String { quote: u8 },
}

impl ScanState {
    #[inline]
    pub fn is_normal(self) -> bool {
        self == ScanState::Normal
    }

    /// Block comment nesting depth, 0 outside comments.
    #[inline]
    pub fn comment_depth(self) -> u16 {
        match self {
            ScanState::BlockComment { depth } => depth,
            _ => 0,
        }
    }
}

/// Fold contribution of a single line.
///
/// Records the net level change and the lowest running level reached
/// relative to the line's start. A closer seen while the running level is
/// already zero is absorbed, so the level never goes negative.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FoldDelta {
    /// Sum of opens (+1) and closes (-1).
    pub net: i32,
    /// Minimum running sum, including the empty prefix, so always `<= 0`.
    pub min: i32,
}

impl FoldDelta {
    #[inline]
    pub fn open(&mut self) {
        self.net += 1;
    }

    #[inline]
    pub fn close(&mut self) {
        self.net -= 1;
        self.min = self.min.min(self.net);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.net == 0 && self.min == 0
    }

    /// Level of the next line given this line's level.
    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "result is clamped to the non-negative u32 range"
    )]
    pub fn apply(&self, level: u32) -> u32 {
        let level = i64::from(level);
        let net = i64::from(self.net);
        let floor = net - i64::from(self.min);
        (level + net).max(floor).clamp(0, i64::from(u32::MAX)) as u32
    }
}
