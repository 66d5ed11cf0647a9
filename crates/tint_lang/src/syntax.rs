//! Lexical rule tables: comments, escapes, sigils, fold delimiters.

use serde::Deserialize;

use crate::kind::{SubStyle, TokenKind};

/// Block comment delimiters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockComment {
    pub open: Box<str>,
    pub close: Box<str>,
}

impl BlockComment {
    pub fn new(open: &str, close: &str) -> Self {
        BlockComment {
            open: open.into(),
            close: close.into(),
        }
    }
}

/// Shape of an escape sequence after the escape character.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapeForm {
    /// Escape character plus any single character (`\n`, `\"`).
    #[default]
    SingleChar,
    /// Escape character plus two hex digits (`\0A`), or a doubled escape
    /// character. Anything else is not an escape.
    HexPair,
}

/// Escape character inside strings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Escape {
    pub byte: u8,
    pub form: EscapeForm,
}

impl Escape {
    /// Length of the escape sequence at the start of `rest`, which begins
    /// with the escape character. Returns 0 when it does not form one.
    pub fn len_at(&self, rest: &[u8]) -> usize {
        debug_assert_eq!(rest.first(), Some(&self.byte));
        match self.form {
            EscapeForm::SingleChar => match rest.get(1) {
                Some(&next) => (1 + utf8_len(next)).min(rest.len()),
                None => 1,
            },
            EscapeForm::HexPair => match rest {
                [_, a, b, ..] if a.is_ascii_hexdigit() && b.is_ascii_hexdigit() => 3,
                [_, next, ..] if *next == self.byte => 2,
                _ => 0,
            },
        }
    }
}

/// Byte length of the UTF-8 sequence introduced by `lead`. Stray
/// continuation bytes count as one.
#[inline]
pub fn utf8_len(lead: u8) -> usize {
    match lead {
        0xF0..=0xF7 => 4,
        0xE0..=0xEF => 3,
        0xC0..=0xDF => 2,
        _ => 1,
    }
}

/// Open/close pair contributing to fold levels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoldPair {
    pub open: Box<str>,
    pub close: Box<str>,
}

impl FoldPair {
    pub fn new(open: &str, close: &str) -> Self {
        FoldPair {
            open: open.into(),
            close: close.into(),
        }
    }
}

/// A prefix character introducing a name (`@global`, `%local`, `!meta`).
///
/// The name after the sigil is an identifier run, a digit run, or a quoted
/// string when `quoted_sub` is set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigilRule {
    pub sigil: char,
    pub kind: TokenKind,
    pub sub: SubStyle,
    /// Sub-style for quoted names; `None` disallows quoting.
    pub quoted_sub: Option<SubStyle>,
    /// The sigil alone (not followed by a name) is still a token of `kind`.
    pub standalone: bool,
    /// Kind for a bare name directly followed by `(`.
    pub call_kind: Option<TokenKind>,
    /// Names starting with one of these prefixes take the paired kind.
    pub prefixes: Vec<(Box<str>, TokenKind)>,
    /// A name followed by `= <word>` takes the paired kind.
    pub declaration: Option<(Box<str>, TokenKind)>,
}

impl SigilRule {
    pub fn new(sigil: char, kind: TokenKind) -> Self {
        SigilRule {
            sigil,
            kind,
            sub: SubStyle::BASE,
            quoted_sub: None,
            standalone: false,
            call_kind: None,
            prefixes: Vec::new(),
            declaration: None,
        }
    }

    #[must_use]
    pub fn sub_style(mut self, sub: SubStyle) -> Self {
        self.sub = sub;
        self
    }

    #[must_use]
    pub fn quoted(mut self, sub: SubStyle) -> Self {
        self.quoted_sub = Some(sub);
        self
    }

    #[must_use]
    pub fn standalone(mut self) -> Self {
        self.standalone = true;
        self
    }

    #[must_use]
    pub fn call(mut self, kind: TokenKind) -> Self {
        self.call_kind = Some(kind);
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: &str, kind: TokenKind) -> Self {
        self.prefixes.push((prefix.into(), kind));
        self
    }

    #[must_use]
    pub fn declaration(mut self, word: &str, kind: TokenKind) -> Self {
        self.declaration = Some((word.into(), kind));
        self
    }

    /// Sigil as a byte. Definitions only accept ASCII sigils.
    #[inline]
    pub fn byte(&self) -> u8 {
        u8::try_from(self.sigil).unwrap_or(0)
    }

    /// Kind for a bare name, before any declaration lookahead.
    pub fn resolve(&self, name: &str, followed_by_paren: bool) -> TokenKind {
        if let Some((_, kind)) = self.prefixes.iter().find(|(p, _)| name.starts_with(&**p)) {
            return *kind;
        }
        match self.call_kind {
            Some(kind) if followed_by_paren => kind,
            _ => self.kind,
        }
    }
}
