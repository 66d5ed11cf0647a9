//! Token stream with a per-line state table.
//!
//! The stream holds every token of the buffer in text order, the escape
//! spans overlaid on string tokens, and one [`LineEntry`] per line. The
//! line table records the scanner state on entry to and exit from each
//! line; the relex controller compares entry states to decide where an
//! incremental scan may stop.
//!
//! # Invariants
//!
//! - Tokens tile `[0, len)`: contiguous, non-empty, non-overlapping.
//! - Every line start is a token boundary and no token crosses a line.
//! - `lines[0].start == 0` and line starts strictly increase.

use std::ops::Range;

use tint_lang::LanguageDefinition;
use tint_scan::{offset, FoldDelta, Lines, ScanState, Scanner, Span, Token, TokenBuf};

/// Per-line record kept alongside the tokens.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LineEntry {
    pub start: u32,
    /// Scanner state at the start of the line.
    pub entry: ScanState,
    /// Scanner state after the line's terminator.
    pub exit: ScanState,
    pub fold: FoldDelta,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    escapes: Vec<Span>,
    lines: Vec<LineEntry>,
    len: u32,
}

impl Default for TokenStream {
    fn default() -> Self {
        TokenStream {
            tokens: Vec::new(),
            escapes: Vec::new(),
            lines: vec![LineEntry::default()],
            len: 0,
        }
    }
}

impl TokenStream {
    /// Scan all of `text` from the normal state.
    #[tracing::instrument(level = "debug", skip_all, fields(language = def.name(), len = text.len()))]
    pub fn scan(def: &LanguageDefinition, text: &[u8]) -> Self {
        let scanner = Scanner::new(def);
        let mut buf = TokenBuf::new();
        let mut lines = Vec::new();
        let mut state = ScanState::Normal;
        for bounds in Lines::new(text) {
            let start = offset(bounds.start);
            let scan = scanner.scan_line(&text[bounds.range()], start, state, &mut buf);
            lines.push(LineEntry {
                start,
                entry: state,
                exit: scan.exit,
                fold: scan.fold,
            });
            state = scan.exit;
        }
        let stream = TokenStream {
            tokens: buf.tokens,
            escapes: buf.escapes,
            lines,
            len: offset(text.len()),
        };
        debug_assert!(stream.is_well_formed(), "full scan broke tiling");
        tracing::debug!(
            tokens = stream.tokens.len(),
            lines = stream.lines.len(),
            "full scan"
        );
        stream
    }

    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn escapes(&self) -> &[Span] {
        &self.escapes
    }

    pub fn lines(&self) -> &[LineEntry] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// State after the last line.
    pub fn end_state(&self) -> ScanState {
        self.lines.last().map_or(ScanState::Normal, |l| l.exit)
    }

    /// End of `line` including its terminator.
    pub fn line_end(&self, line: usize) -> u32 {
        self.lines.get(line + 1).map_or(self.len, |l| l.start)
    }

    pub fn line_span(&self, line: usize) -> Option<Span> {
        let entry = self.lines.get(line)?;
        Some(Span::new(entry.start, self.line_end(line)))
    }

    /// Line containing `pos`. Offsets at or past the end map to the last line.
    pub fn line_of(&self, pos: u32) -> usize {
        self.lines.partition_point(|l| l.start <= pos).saturating_sub(1)
    }

    /// Line starting exactly at `pos`, if any.
    pub fn line_starting_at(&self, pos: u32) -> Option<usize> {
        self.lines.binary_search_by_key(&pos, |l| l.start).ok()
    }

    /// Indices of the tokens that start inside `span`.
    pub fn token_range(&self, span: Span) -> Range<usize> {
        let lo = self.tokens.partition_point(|t| t.span.start < span.start);
        let hi = self.tokens.partition_point(|t| t.span.start < span.end);
        lo..hi.max(lo)
    }

    /// Tokens of `line`.
    pub fn line_tokens(&self, line: usize) -> &[Token] {
        match self.line_span(line) {
            Some(span) => &self.tokens[self.token_range(span)],
            None => &[],
        }
    }

    /// Escape spans that start inside `span`.
    pub fn escapes_in(&self, span: Span) -> &[Span] {
        let lo = self.escapes.partition_point(|e| e.start < span.start);
        let hi = self.escapes.partition_point(|e| e.start < span.end);
        &self.escapes[lo..hi.max(lo)]
    }

    /// First line at or after `from` whose entry state differs from the
    /// previous line's exit state.
    pub fn first_break(&self, from: usize) -> Option<usize> {
        (from.max(1)..self.lines.len()).find(|&i| self.lines[i].entry != self.lines[i - 1].exit)
    }

    /// Replace the old lines `old` with `new_lines` and their tokens, and
    /// shift everything after by `delta`. The first replaced line starts at
    /// the same offset in old and new text.
    pub(crate) fn splice(
        &mut self,
        old: Range<usize>,
        new_lines: Vec<LineEntry>,
        buf: TokenBuf,
        delta: i64,
        new_len: u32,
    ) {
        let from = self.lines[old.start].start;
        let old_to = if old.end < self.lines.len() {
            self.lines[old.end].start
        } else {
            self.len
        };
        let replaced = Span::new(from, old_to);

        let tokens = self.token_range(replaced);
        let kept = tokens.start + buf.tokens.len();
        self.tokens.splice(tokens, buf.tokens);

        let lo = self.escapes.partition_point(|e| e.start < from);
        let hi = self.escapes.partition_point(|e| e.start < old_to);
        let kept_escapes = lo + buf.escapes.len();
        self.escapes.splice(lo..hi, buf.escapes);

        let kept_lines = old.start + new_lines.len();
        self.lines.splice(old, new_lines);

        if delta != 0 {
            for token in &mut self.tokens[kept..] {
                token.span = token.span.shifted(delta);
            }
            for escape in &mut self.escapes[kept_escapes..] {
                *escape = escape.shifted(delta);
            }
            for line in &mut self.lines[kept_lines..] {
                line.start = tint_scan::shift(line.start, delta);
            }
        }
        self.len = new_len;
        debug_assert!(self.is_well_formed(), "splice broke tiling");
    }

    /// Check the tiling invariants.
    pub fn is_well_formed(&self) -> bool {
        let mut pos = 0;
        for token in &self.tokens {
            if token.span.start != pos || token.span.is_empty() {
                return false;
            }
            pos = token.span.end;
        }
        if pos != self.len {
            return false;
        }
        if self.lines.first().map(|l| l.start) != Some(0) {
            return false;
        }
        let ascending = self.lines.windows(2).all(|w| w[0].start < w[1].start);
        let aligned = self.lines.iter().all(|l| {
            l.start == self.len
                || self
                    .tokens
                    .binary_search_by_key(&l.start, |t| t.span.start)
                    .is_ok()
        });
        ascending && aligned
    }
}
