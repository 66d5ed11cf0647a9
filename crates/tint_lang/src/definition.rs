//! The language definition consumed by the scanner.
//!
//! A [`LanguageDefinition`] is pure data: keyword groups, style rules,
//! scalar lexer attributes, and the lexical rule tables. It is validated
//! once by [`LanguageBuilder::build`] and then shared read-only (behind an
//! `Arc`) by every scanner, buffer and thread using that language.

use std::sync::Arc;

use crate::error::DefinitionError;
use crate::flags::{CharClass, CharClasses, FoldFlags, LexerFlags};
use crate::keywords::{DuplicatePolicy, KeywordGroup, KeywordMatch, KeywordTable};
use crate::kind::TokenKind;
use crate::style::{StyleRule, StyleTable};
use crate::syntax::{BlockComment, Escape, FoldPair, SigilRule};

/// Scalar lexer attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LexerAttributes {
    pub tab_width: u8,
    pub indent_width: u8,
    pub escape: Option<Escape>,
    /// Kind given to operator tokens.
    pub operator_kind: TokenKind,
    pub fold: FoldFlags,
    pub flags: LexerFlags,
}

impl Default for LexerAttributes {
    fn default() -> Self {
        LexerAttributes {
            tab_width: 4,
            indent_width: 4,
            escape: None,
            operator_kind: TokenKind::Operator,
            fold: FoldFlags::DELIMITERS,
            flags: LexerFlags::NO_BLOCK_COMMENT,
        }
    }
}

impl LexerAttributes {
    #[inline]
    pub fn has_block_comment(&self) -> bool {
        !self.flags.contains(LexerFlags::NO_BLOCK_COMMENT)
    }
}

/// Immutable, validated description of one language.
#[derive(Debug)]
pub struct LanguageDefinition {
    name: Box<str>,
    extensions: Vec<Box<str>>,
    keywords: KeywordTable,
    styles: StyleTable,
    attrs: LexerAttributes,
    line_comment: Option<Box<str>>,
    block_comment: Option<BlockComment>,
    quotes: Vec<u8>,
    /// Multi-character operators, longest first.
    operators: Vec<Box<str>>,
    fold_pairs: Vec<FoldPair>,
    sigils: Vec<SigilRule>,
    classes: CharClasses,
}

impl LanguageDefinition {
    pub fn builder(name: &str) -> LanguageBuilder {
        LanguageBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(AsRef::as_ref)
    }

    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    /// Classify an identifier-like lexeme against the keyword groups.
    #[inline]
    pub fn classify(&self, word: &str, followed_by_paren: bool) -> Option<KeywordMatch> {
        self.keywords.classify(word, followed_by_paren)
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    pub fn style(&self, kind: TokenKind) -> Option<&StyleRule> {
        self.styles.rule(kind)
    }

    pub fn attributes(&self) -> &LexerAttributes {
        &self.attrs
    }

    pub fn line_comment(&self) -> Option<&str> {
        self.line_comment.as_deref()
    }

    /// Block comment delimiters; `None` when the language has none.
    pub fn block_comment(&self) -> Option<&BlockComment> {
        self.block_comment.as_ref()
    }

    pub fn nested_comments(&self) -> bool {
        self.attrs.flags.contains(LexerFlags::NESTED_COMMENTS)
    }

    pub fn operators(&self) -> &[Box<str>] {
        &self.operators
    }

    pub fn fold_pairs(&self) -> &[FoldPair] {
        &self.fold_pairs
    }

    pub fn sigil(&self, byte: u8) -> Option<&SigilRule> {
        if !self.classes.is(byte, CharClass::SIGIL) {
            return None;
        }
        self.sigils.iter().find(|s| s.byte() == byte)
    }

    pub fn sigils(&self) -> &[SigilRule] {
        &self.sigils
    }

    pub fn is_quote(&self, byte: u8) -> bool {
        self.classes.is(byte, CharClass::QUOTE)
    }

    pub fn quotes(&self) -> &[u8] {
        &self.quotes
    }

    pub fn classes(&self) -> &CharClasses {
        &self.classes
    }
}

/// Fluent builder for [`LanguageDefinition`].
///
/// Nothing is validated until [`build`](Self::build), which reports the
/// first configuration error found.
#[derive(Clone, Debug)]
pub struct LanguageBuilder {
    name: String,
    extensions: Vec<String>,
    groups: Vec<Result<KeywordGroup, DefinitionError>>,
    duplicates: DuplicatePolicy,
    styles: Vec<StyleRule>,
    attrs: LexerAttributes,
    line_comment: Option<String>,
    block_comment: Option<BlockComment>,
    quotes: Vec<char>,
    operator_chars: String,
    operators: Vec<String>,
    fold_pairs: Vec<FoldPair>,
    sigils: Vec<SigilRule>,
    ident_extra: String,
}

impl LanguageBuilder {
    pub fn new(name: &str) -> Self {
        LanguageBuilder {
            name: name.to_owned(),
            extensions: Vec::new(),
            groups: Vec::new(),
            duplicates: DuplicatePolicy::default(),
            styles: Vec::new(),
            attrs: LexerAttributes::default(),
            line_comment: None,
            block_comment: None,
            quotes: Vec::new(),
            operator_chars: String::new(),
            operators: Vec::new(),
            fold_pairs: Vec::new(),
            sigils: Vec::new(),
            ident_extra: String::new(),
        }
    }

    #[must_use]
    pub fn extension(mut self, ext: &str) -> Self {
        self.extensions.push(ext.to_owned());
        self
    }

    /// Append a keyword group. Groups are searched in the order added.
    #[must_use]
    pub fn keywords<I, S>(
        mut self,
        name: &str,
        kind: TokenKind,
        lookup: crate::keywords::KeywordLookup,
        words: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.groups.push(KeywordGroup::new(name, kind, lookup, words));
        self
    }

    #[must_use]
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    #[must_use]
    pub fn style(mut self, rule: StyleRule) -> Self {
        self.styles.push(rule);
        self
    }

    #[must_use]
    pub fn attributes(mut self, attrs: LexerAttributes) -> Self {
        self.attrs = attrs;
        self
    }

    #[must_use]
    pub fn line_comment(mut self, marker: &str) -> Self {
        self.line_comment = Some(marker.to_owned());
        self
    }

    #[must_use]
    pub fn block_comment(mut self, open: &str, close: &str) -> Self {
        self.block_comment = Some(BlockComment::new(open, close));
        self
    }

    #[must_use]
    pub fn quote(mut self, quote: char) -> Self {
        self.quotes.push(quote);
        self
    }

    /// Characters scanned as single-character operators.
    #[must_use]
    pub fn operator_chars(mut self, chars: &str) -> Self {
        self.operator_chars.push_str(chars);
        self
    }

    /// A multi-character operator, matched longest-first.
    #[must_use]
    pub fn operator(mut self, op: &str) -> Self {
        self.operators.push(op.to_owned());
        self
    }

    #[must_use]
    pub fn fold_pair(mut self, open: &str, close: &str) -> Self {
        self.fold_pairs.push(FoldPair::new(open, close));
        self
    }

    #[must_use]
    pub fn sigil(mut self, rule: SigilRule) -> Self {
        self.sigils.push(rule);
        self
    }

    /// Extra characters allowed inside (not at the start of) identifiers.
    #[must_use]
    pub fn ident_chars(mut self, chars: &str) -> Self {
        self.ident_extra.push_str(chars);
        self
    }

    /// Validate and freeze the definition.
    pub fn build(self) -> Result<Arc<LanguageDefinition>, DefinitionError> {
        let LanguageBuilder {
            name,
            extensions,
            groups,
            duplicates,
            styles,
            attrs,
            line_comment,
            block_comment,
            quotes,
            operator_chars,
            operators,
            fold_pairs,
            sigils,
            ident_extra,
        } = self;

        if attrs.tab_width == 0 {
            return Err(DefinitionError::ZeroWidth { what: "tab width" });
        }
        if attrs.indent_width == 0 {
            return Err(DefinitionError::ZeroWidth {
                what: "indent width",
            });
        }
        if let Some(escape) = attrs.escape {
            check_ascii("escape character", char::from(escape.byte))?;
        }

        match (&block_comment, attrs.has_block_comment()) {
            (Some(_), false) => return Err(DefinitionError::BlockCommentConflict),
            (None, true) => return Err(DefinitionError::MissingBlockComment),
            _ => {}
        }
        if attrs.flags.contains(LexerFlags::NESTED_COMMENTS) && block_comment.is_none() {
            return Err(DefinitionError::NestedWithoutBlockComment);
        }
        if let Some(block) = &block_comment {
            if block.open.is_empty() || block.close.is_empty() {
                return Err(DefinitionError::Empty {
                    what: "block comment delimiter",
                });
            }
        }
        if line_comment.as_deref() == Some("") {
            return Err(DefinitionError::Empty {
                what: "line comment marker",
            });
        }

        let groups = groups.into_iter().collect::<Result<Vec<_>, _>>()?;
        let keywords = KeywordTable::new(groups, duplicates)?;
        let styles = StyleTable::new(styles)?;

        let mut classes = CharClasses::ascii_base();
        for ch in ident_extra.chars() {
            let byte = check_ascii("identifier character", ch)?;
            classes.insert(byte, CharClass::IDENT_CONTINUE);
        }
        let mut quote_bytes = Vec::with_capacity(quotes.len());
        for &ch in &quotes {
            let byte = check_ascii("quote", ch)?;
            classes.insert(byte, CharClass::QUOTE);
            quote_bytes.push(byte);
        }
        for ch in operator_chars.chars() {
            let byte = check_ascii("operator", ch)?;
            classes.insert(byte, CharClass::OPERATOR);
        }
        for (i, rule) in sigils.iter().enumerate() {
            let byte = check_ascii("sigil", rule.sigil)?;
            if sigils[..i].iter().any(|s| s.sigil == rule.sigil) {
                return Err(DefinitionError::DuplicateSigil { sigil: rule.sigil });
            }
            classes.insert(byte, CharClass::SIGIL);
        }

        let mut operators: Vec<Box<str>> = operators.into_iter().map(Into::into).collect();
        if operators.iter().any(|op| op.is_empty()) {
            return Err(DefinitionError::Empty { what: "operator" });
        }
        operators.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        operators.dedup();

        for pair in &fold_pairs {
            for delimiter in [&pair.open, &pair.close] {
                let single = delimiter.len() == 1
                    && classes.is(delimiter.as_bytes()[0], CharClass::OPERATOR);
                if !single && !operators.iter().any(|op| op == delimiter) {
                    return Err(DefinitionError::FoldPairNotOperator {
                        delimiter: delimiter.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            language = %name,
            groups = keywords.len(),
            styles = styles.len(),
            "language definition built"
        );

        Ok(Arc::new(LanguageDefinition {
            name: name.into(),
            extensions: extensions.into_iter().map(Into::into).collect(),
            keywords,
            styles,
            attrs,
            line_comment: line_comment.map(Into::into),
            block_comment,
            quotes: quote_bytes,
            operators,
            fold_pairs,
            sigils,
            classes,
        }))
    }
}

fn check_ascii(what: &'static str, ch: char) -> Result<u8, DefinitionError> {
    match u8::try_from(ch) {
        Ok(byte) if byte.is_ascii_graphic() => Ok(byte),
        _ => Err(DefinitionError::NonAscii { what, ch }),
    }
}
