//! Table-driven line scanner.
//!
//! Every decision the scanner makes comes from a [`LanguageDefinition`]:
//! comment markers, quotes, escape form, sigil rules, operator tables and
//! the precomputed character classes. Scanning is line-at-a-time. A line is
//! scanned from the [`ScanState`] left by the previous line and produces the
//! state for the next, plus the line's fold contribution. Tokens never cross
//! a line boundary; a multi-line comment or string is one token per line.
//!
//! # Tokens per Line
//!
//! The tokens of a line tile it exactly: contiguous, non-overlapping,
//! starting at the line start and ending at the line end. The terminator
//! (`\n`, `\r\n` or `\r`), when present, is its own [`TokenKind::Default`]
//! token. Escape sequences inside strings are not tokens; they are reported
//! as spans on the side so a string stays a single token.
//!
//! # Dispatch Order
//!
//! In the normal state, at each position the first matching rule wins:
//! whitespace, line comment, block comment open, stray block comment close,
//! quote, sigil, number, identifier/keyword/label, operator. Anything else is
//! a one-character [`TokenKind::Default`] token.

use tint_lang::{CharClass, FoldFlags, LanguageDefinition, LexerFlags, SigilRule, SubStyle, TokenKind};

use crate::cursor::Cursor;
use crate::lines::{terminator_len, Lines};
use crate::token::{offset, FoldDelta, ScanState, Span, Token};

/// Token and escape output of a scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenBuf {
    pub tokens: Vec<Token>,
    /// Escape sequences inside string tokens, in text order.
    pub escapes: Vec<Span>,
}

impl TokenBuf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
        self.escapes.clear();
    }
}

/// Result of scanning one line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LineScan {
    /// State at the start of the next line.
    pub exit: ScanState,
    pub fold: FoldDelta,
}

/// Result of scanning a whole buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanOutput {
    pub tokens: Vec<Token>,
    pub escapes: Vec<Span>,
    /// State after the last line.
    pub end_state: ScanState,
}

/// Stateless scanner borrowing a language definition.
#[derive(Copy, Clone, Debug)]
pub struct Scanner<'d> {
    def: &'d LanguageDefinition,
}

impl<'d> Scanner<'d> {
    pub fn new(def: &'d LanguageDefinition) -> Self {
        Scanner { def }
    }

    pub fn definition(&self) -> &'d LanguageDefinition {
        self.def
    }

    /// Scan `text`, whose first byte sits at absolute offset `base`,
    /// starting in state `entry`.
    pub fn scan(&self, text: &[u8], base: u32, entry: ScanState) -> ScanOutput {
        let mut buf = TokenBuf::new();
        let mut state = entry;
        for line in Lines::new(text) {
            let scan = self.scan_line(&text[line.range()], base + offset(line.start), state, &mut buf);
            state = scan.exit;
        }
        ScanOutput {
            tokens: buf.tokens,
            escapes: buf.escapes,
            end_state: state,
        }
    }

    /// Scan a single line (including its terminator, if any) starting at
    /// absolute offset `base` in state `entry`. Tokens and escapes are
    /// appended to `out`.
    pub fn scan_line(&self, line: &[u8], base: u32, entry: ScanState, out: &mut TokenBuf) -> LineScan {
        let content = &line[..line.len() - terminator_len(line)];
        let mut lexer = LineLexer {
            def: self.def,
            cursor: Cursor::new(content),
            base,
            state: entry,
            fold: FoldDelta::default(),
            out,
        };
        lexer.run();
        let (exit, fold) = (lexer.state, lexer.fold);
        if content.len() < line.len() {
            out.tokens.push(Token::new(
                Span::new(base + offset(content.len()), base + offset(line.len())),
                TokenKind::Default,
                SubStyle::BASE,
            ));
        }
        LineScan { exit, fold }
    }
}

/// Per-line scanning state.
struct LineLexer<'a> {
    def: &'a LanguageDefinition,
    cursor: Cursor<'a>,
    base: u32,
    state: ScanState,
    fold: FoldDelta,
    out: &'a mut TokenBuf,
}

impl LineLexer<'_> {
    fn run(&mut self) {
        // Continue a construct left open by the previous line.
        match self.state {
            ScanState::Normal => {}
            ScanState::BlockComment { .. } => {
                self.block_comment_body();
                self.emit(0, TokenKind::Comment, SubStyle::BASE);
            }
            ScanState::String { quote } => {
                let multiline = self.flag(LexerFlags::MULTILINE_STRINGS);
                self.string_body(quote, multiline);
                self.emit(0, TokenKind::String, SubStyle::BASE);
            }
        }

        while !self.cursor.is_eof() {
            let start = self.cursor.pos();
            let (kind, sub) = self.next_token();
            debug_assert!(self.cursor.pos() > start, "scanner made no progress");
            self.emit(start, kind, sub);
        }
    }

    fn emit(&mut self, start: usize, kind: TokenKind, sub: SubStyle) {
        let end = self.cursor.pos();
        if end > start {
            let span = Span::new(self.base + offset(start), self.base + offset(end));
            self.out.tokens.push(Token::new(span, kind, sub));
        }
    }

    #[inline]
    fn flag(&self, flag: LexerFlags) -> bool {
        self.def.attributes().flags.contains(flag)
    }

    #[inline]
    fn is(&self, byte: u8, class: CharClass) -> bool {
        self.def.classes().is(byte, class)
    }

    fn next_token(&mut self) -> (TokenKind, SubStyle) {
        let b = self.cursor.current();

        if self.is(b, CharClass::WHITESPACE) {
            let classes = self.def.classes();
            self.cursor.eat_while(|b| classes.is(b, CharClass::WHITESPACE));
            return (TokenKind::Default, SubStyle::BASE);
        }

        if let Some(marker) = self.def.line_comment() {
            if self.cursor.starts_with(marker.as_bytes()) {
                self.cursor.advance_to_end();
                return (TokenKind::Comment, SubStyle::BASE);
            }
        }

        if let Some(block) = self.def.block_comment() {
            if self.cursor.starts_with(block.open.as_bytes()) {
                self.cursor.advance_n(block.open.len());
                self.state = ScanState::BlockComment { depth: 1 };
                if self.def.attributes().fold.contains(FoldFlags::BLOCK_COMMENT) {
                    self.fold.open();
                }
                self.block_comment_body();
                return (TokenKind::Comment, SubStyle::BASE);
            }
            if self.cursor.starts_with(block.close.as_bytes()) {
                // Stray closer outside any comment.
                self.cursor.advance_n(block.close.len());
                return (TokenKind::Comment, SubStyle::BASE);
            }
        }

        if self.def.is_quote(b) {
            self.cursor.advance();
            let multiline = self.flag(LexerFlags::MULTILINE_STRINGS);
            self.string_body(b, multiline);
            return (TokenKind::String, SubStyle::BASE);
        }

        if let Some(rule) = self.def.sigil(b) {
            if let Some(token) = self.sigil(rule) {
                return token;
            }
        }

        if self.starts_number() {
            self.number();
            return (TokenKind::Number, SubStyle::BASE);
        }

        if self.is(b, CharClass::IDENT_START) {
            return self.word();
        }

        if let Some(len) = self.operator_len() {
            let start = self.cursor.pos();
            self.cursor.advance_n(len);
            self.fold_event(self.cursor.slice_from(start));
            return (self.def.attributes().operator_kind, SubStyle::BASE);
        }

        self.cursor.advance_char();
        (TokenKind::Default, SubStyle::BASE)
    }

    // ─── Comments ───────────────────────────────────────────────────────

    /// Consume comment text up to and including the closer that brings the
    /// depth to zero, or to end of line.
    fn block_comment_body(&mut self) {
        let ScanState::BlockComment { mut depth } = self.state else {
            return;
        };
        let Some(block) = self.def.block_comment() else {
            // A state from a definition without block comments.
            self.state = ScanState::Normal;
            return;
        };
        let (open, close) = (block.open.as_bytes(), block.close.as_bytes());
        let nested = self.def.nested_comments();

        loop {
            let found = if nested {
                self.cursor.skip_to_either(open[0], close[0])
            } else {
                self.cursor.skip_to(close[0])
            };
            if !found {
                break;
            }
            if nested && self.cursor.starts_with(open) {
                self.cursor.advance_n(open.len());
                depth = depth.saturating_add(1);
            } else if self.cursor.starts_with(close) {
                self.cursor.advance_n(close.len());
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    self.state = ScanState::Normal;
                    if self.def.attributes().fold.contains(FoldFlags::BLOCK_COMMENT) {
                        self.fold.close();
                    }
                    return;
                }
            } else {
                self.cursor.advance();
            }
        }
        self.state = ScanState::BlockComment { depth };
    }

    // ─── Strings ────────────────────────────────────────────────────────

    /// Consume string text after the opening quote, through the closing
    /// quote or to end of line. Escapes are recorded as side spans.
    fn string_body(&mut self, quote: u8, multiline: bool) {
        let escape = self.def.attributes().escape.filter(|e| e.byte != quote);
        loop {
            let found = match escape {
                Some(esc) => self.cursor.skip_to_either(quote, esc.byte),
                None => self.cursor.skip_to(quote),
            };
            if !found {
                self.state = if multiline {
                    ScanState::String { quote }
                } else {
                    ScanState::Normal
                };
                return;
            }
            if self.cursor.current() == quote {
                self.cursor.advance();
                self.state = ScanState::Normal;
                return;
            }
            // At an escape character.
            let len = escape.map_or(0, |esc| esc.len_at(self.cursor.rest()));
            if len == 0 {
                self.cursor.advance();
                continue;
            }
            let start = self.cursor.pos();
            self.cursor.advance_n(len);
            let span = Span::new(self.base + offset(start), self.base + offset(self.cursor.pos()));
            self.out.escapes.push(span);
        }
    }

    // ─── Sigils ─────────────────────────────────────────────────────────

    /// Sigil-prefixed name. Returns `None`, without consuming anything, when
    /// the sigil is not followed by a name and does not stand alone.
    fn sigil(&mut self, rule: &SigilRule) -> Option<(TokenKind, SubStyle)> {
        let next = self.cursor.peek();

        if let Some(quoted_sub) = rule.quoted_sub {
            if self.def.is_quote(next) {
                self.cursor.advance_n(2);
                self.string_body(next, false);
                return Some((rule.kind, quoted_sub));
            }
        }

        if self.is(next, CharClass::IDENT_CONTINUE) {
            self.cursor.advance();
            let name_start = self.cursor.pos();
            let classes = self.def.classes();
            self.cursor.eat_while(|b| classes.is(b, CharClass::IDENT_CONTINUE));
            let name = std::str::from_utf8(self.cursor.slice_from(name_start)).unwrap_or_default();
            let paren = self.cursor.current() == b'(';

            let kind = rule.resolve(name, paren);
            if kind != rule.kind {
                return Some((kind, SubStyle::BASE));
            }
            if let Some((word, decl_kind)) = &rule.declaration {
                if self.declares(word) {
                    return Some((*decl_kind, SubStyle::BASE));
                }
            }
            return Some((rule.kind, rule.sub));
        }

        if rule.standalone {
            self.cursor.advance();
            return Some((rule.kind, rule.sub));
        }
        None
    }

    /// Lookahead for `= <word>` after a name, with optional whitespace.
    fn declares(&self, word: &str) -> bool {
        let mut look = self.cursor;
        let classes = self.def.classes();
        look.eat_while(|b| classes.is(b, CharClass::WHITESPACE));
        if look.current() != b'=' {
            return false;
        }
        look.advance();
        look.eat_while(|b| classes.is(b, CharClass::WHITESPACE));
        if !look.starts_with(word.as_bytes()) {
            return false;
        }
        look.advance_n(word.len());
        !classes.is(look.current(), CharClass::IDENT_CONTINUE)
    }

    // ─── Numbers ────────────────────────────────────────────────────────

    fn starts_number(&self) -> bool {
        let b = self.cursor.current();
        if self.is(b, CharClass::DIGIT) {
            return true;
        }
        matches!(b, b'+' | b'-')
            && self.flag(LexerFlags::SIGNED_NUMBERS)
            && self.is(self.cursor.peek(), CharClass::DIGIT)
    }

    /// Decimal with optional fraction and exponent, or `0x` followed by
    /// alphanumerics (covers prefixed hex float forms like `0xK...`).
    fn number(&mut self) {
        if matches!(self.cursor.current(), b'+' | b'-') {
            self.cursor.advance();
        }
        if self.cursor.current() == b'0' && matches!(self.cursor.peek(), b'x' | b'X') {
            self.cursor.advance_n(2);
            self.cursor.eat_while(|b| b.is_ascii_alphanumeric());
            return;
        }
        self.cursor.eat_while(|b| b.is_ascii_digit());
        if self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_digit());
        }
        if matches!(self.cursor.current(), b'e' | b'E') {
            let exp = match self.cursor.peek() {
                b'+' | b'-' if self.cursor.peek2().is_ascii_digit() => 2,
                d if d.is_ascii_digit() => 1,
                _ => 0,
            };
            if exp > 0 {
                self.cursor.advance_n(exp);
                self.cursor.eat_while(|b| b.is_ascii_digit());
            }
        }
    }

    // ─── Words ──────────────────────────────────────────────────────────

    fn word(&mut self) -> (TokenKind, SubStyle) {
        let start = self.cursor.pos();
        let classes = self.def.classes();
        self.cursor.advance();
        self.cursor.eat_while(|b| classes.is(b, CharClass::IDENT_CONTINUE));

        if self.flag(LexerFlags::LABELS) && self.cursor.current() == b':' {
            self.cursor.advance();
            return (TokenKind::Label, SubStyle::BASE);
        }

        let word = std::str::from_utf8(self.cursor.slice_from(start)).unwrap_or_default();
        let paren = self.cursor.current() == b'(';
        match self.def.classify(word, paren) {
            Some(found) => (found.kind, SubStyle::BASE),
            None => (TokenKind::Identifier, SubStyle::BASE),
        }
    }

    // ─── Operators ──────────────────────────────────────────────────────

    /// Longest multi-character operator, else a single operator character.
    fn operator_len(&self) -> Option<usize> {
        let rest = self.cursor.rest();
        if let Some(op) = self.def.operators().iter().find(|op| rest.starts_with(op.as_bytes())) {
            return Some(op.len());
        }
        self.is(self.cursor.current(), CharClass::OPERATOR).then_some(1)
    }

    fn fold_event(&mut self, op: &[u8]) {
        if !self.def.attributes().fold.contains(FoldFlags::DELIMITERS) {
            return;
        }
        for pair in self.def.fold_pairs() {
            if op == pair.open.as_bytes() {
                self.fold.open();
                return;
            }
            if op == pair.close.as_bytes() {
                self.fold.close();
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests;
