//! Read-side queries over [`Highlights`].
//!
//! Every lookup is a binary search over the token array or the line table.

use smallvec::SmallVec;
use tint_lang::{StyleRule, SubStyle, TokenKind};
use tint_scan::{Span, Token};

use crate::fold::FoldLevel;
use crate::highlights::Highlights;

/// A piece of a line ready for painting: a token, or part of one, clipped
/// to the requested range, with escapes split out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    pub span: Span,
    pub kind: TokenKind,
    pub sub: SubStyle,
    /// Left over from before the last edit; the style is not known.
    pub stale: bool,
}

/// Segments for a typical line fit inline.
pub type Segments = SmallVec<[Segment; 16]>;

impl Highlights {
    pub fn len(&self) -> u32 {
        self.stream().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stream().is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.stream().line_count()
    }

    /// Line containing `offset`; offsets past the end map to the last line.
    pub fn line_of(&self, offset: u32) -> usize {
        self.stream().line_of(offset)
    }

    /// Byte range of `line`, including its terminator.
    pub fn line_span(&self, line: usize) -> Option<Span> {
        self.stream().line_span(line)
    }

    pub fn line_tokens(&self, line: usize) -> &[Token] {
        self.stream().line_tokens(line)
    }

    pub fn token_at(&self, offset: u32) -> Option<&Token> {
        let tokens = self.stream().tokens();
        let idx = tokens.partition_point(|t| t.span.end <= offset);
        tokens.get(idx).filter(|t| t.span.contains(offset))
    }

    /// Tokens overlapping `range`. An empty range touches nothing.
    pub fn tokens_in(&self, range: Span) -> &[Token] {
        if range.is_empty() {
            return &[];
        }
        let tokens = self.stream().tokens();
        let lo = tokens.partition_point(|t| t.span.end <= range.start);
        let hi = tokens.partition_point(|t| t.span.start < range.end);
        &tokens[lo..hi.max(lo)]
    }

    pub fn is_stale_line(&self, line: usize) -> bool {
        self.stale_from().is_some_and(|s| line >= s)
    }

    fn stale_offset(&self) -> Option<u32> {
        self.stale_from()
            .and_then(|line| self.line_span(line))
            .map(|span| span.start)
    }

    /// Segments covering `range`, clipped to it, with escape sequences
    /// inside strings split out as [`TokenKind::Escape`].
    pub fn segments(&self, range: Span) -> Segments {
        let stale_at = self.stale_offset();
        let mut out = Segments::new();
        let mut push = |span: Span, kind, sub, stale| {
            let start = span.start.max(range.start);
            let end = span.end.min(range.end);
            if start < end {
                out.push(Segment {
                    span: Span::new(start, end),
                    kind,
                    sub,
                    stale,
                });
            }
        };

        for token in self.tokens_in(range) {
            let stale = stale_at.is_some_and(|at| token.span.start >= at);
            let mut at = token.span.start;
            for escape in self.stream().escapes_in(token.span) {
                push(Span::new(at, escape.start), token.kind, token.sub, stale);
                push(*escape, TokenKind::Escape, SubStyle::BASE, stale);
                at = escape.end;
            }
            push(Span::new(at, token.span.end), token.kind, token.sub, stale);
        }
        out
    }

    /// Kind and sub-style at `offset`, looking through escapes. `None` past
    /// the end or on a stale line.
    pub fn kind_at(&self, offset: u32) -> Option<(TokenKind, SubStyle)> {
        let token = self.token_at(offset)?;
        if self.is_stale_line(self.line_of(offset)) {
            return None;
        }
        let in_escape = self
            .stream()
            .escapes_in(token.span)
            .iter()
            .any(|e| e.contains(offset));
        if in_escape {
            Some((TokenKind::Escape, SubStyle::BASE))
        } else {
            Some((token.kind, token.sub))
        }
    }

    pub fn style_of(&self, kind: TokenKind) -> Option<&StyleRule> {
        self.definition().style(kind)
    }

    pub fn style_at(&self, offset: u32) -> Option<&StyleRule> {
        let (kind, _) = self.kind_at(offset)?;
        self.style_of(kind)
    }

    pub fn fold_level(&self, line: usize) -> Option<FoldLevel> {
        self.folds().get(line)
    }

    pub fn is_fold_header(&self, line: usize) -> bool {
        self.folds().get(line).is_some_and(|l| l.header)
    }

    /// Last line of the fold started by the header at `line`.
    pub fn fold_end(&self, line: usize) -> Option<usize> {
        self.folds().fold_end(line)
    }
}

#[cfg(test)]
mod tests;
