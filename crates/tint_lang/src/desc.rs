//! Declarative, serde-deserializable language descriptions.
//!
//! [`LanguageDesc`] mirrors the builder API as plain data so a host can
//! load definitions from any serde format. Keyword lists may be written
//! as arrays or as one whitespace-separated string, the way generated
//! keyword tables usually are. Unknown fields are ignored so newer
//! descriptions still load.

use std::sync::Arc;

use serde::Deserialize;

use crate::definition::{LanguageBuilder, LanguageDefinition, LexerAttributes};
use crate::error::DefinitionError;
use crate::flags::{FoldFlags, LexerFlags};
use crate::keywords::{DuplicatePolicy, KeywordLookup};
use crate::kind::{SubStyle, TokenKind};
use crate::style::StyleRule;
use crate::syntax::{Escape, EscapeForm, SigilRule};

#[derive(Clone, Debug, Deserialize)]
pub struct LanguageDesc {
    pub name: String,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<KeywordGroupDesc>,
    /// Accept words declared in several groups (earliest group wins).
    #[serde(default)]
    pub allow_shadowed_keywords: bool,
    #[serde(default)]
    pub styles: Vec<StyleDesc>,
    #[serde(default)]
    pub lexer: LexerDesc,
    #[serde(default)]
    pub syntax: SyntaxDesc,
}

#[derive(Clone, Debug, Deserialize)]
pub struct KeywordGroupDesc {
    pub name: String,
    pub kind: TokenKind,
    /// The words are in byte order; use binary search.
    #[serde(default)]
    pub sorted: bool,
    pub words: Words,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Words {
    List(Vec<String>),
    Text(String),
}

impl Words {
    fn iter(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Words::List(list) => Box::new(list.iter().map(String::as_str)),
            Words::Text(text) => Box::new(text.split_whitespace()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct StyleDesc {
    pub kind: TokenKind,
    #[serde(default = "one")]
    pub sub_styles: u8,
    pub name: String,
    /// Passed through to the renderer untouched.
    #[serde(default)]
    pub attributes: String,
}

fn one() -> u8 {
    1
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each bool maps to an independent lexer flag"
)]
pub struct LexerDesc {
    pub tab_width: u8,
    pub indent_width: u8,
    pub escape: Option<char>,
    pub escape_form: EscapeForm,
    pub operator_kind: TokenKind,
    /// Defaults to whether `syntax.block_comment` is present.
    pub has_block_comment: Option<bool>,
    pub nested_comments: bool,
    pub multiline_strings: bool,
    pub signed_numbers: bool,
    pub labels: bool,
    pub fold_delimiters: bool,
    pub fold_block_comments: bool,
}

impl Default for LexerDesc {
    fn default() -> Self {
        LexerDesc {
            tab_width: 4,
            indent_width: 4,
            escape: None,
            escape_form: EscapeForm::SingleChar,
            operator_kind: TokenKind::Operator,
            has_block_comment: None,
            nested_comments: false,
            multiline_strings: false,
            signed_numbers: false,
            labels: false,
            fold_delimiters: true,
            fold_block_comments: false,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SyntaxDesc {
    pub line_comment: Option<String>,
    pub block_comment: Option<DelimiterDesc>,
    pub quotes: String,
    pub operator_chars: String,
    pub operators: Vec<String>,
    pub fold_pairs: Vec<DelimiterDesc>,
    pub sigils: Vec<SigilDesc>,
    pub ident_chars: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DelimiterDesc {
    pub open: String,
    pub close: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SigilDesc {
    pub sigil: char,
    pub kind: TokenKind,
    #[serde(default)]
    pub sub: SubStyle,
    #[serde(default)]
    pub quoted_sub: Option<SubStyle>,
    #[serde(default)]
    pub standalone: bool,
    #[serde(default)]
    pub call_kind: Option<TokenKind>,
    #[serde(default)]
    pub prefixes: Vec<PrefixDesc>,
    #[serde(default)]
    pub declaration: Option<PrefixDesc>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PrefixDesc {
    pub text: String,
    pub kind: TokenKind,
}

impl LanguageDesc {
    /// Validate the description and build the shared definition.
    pub fn build(self) -> Result<Arc<LanguageDefinition>, DefinitionError> {
        self.into_builder()?.build()
    }

    fn into_builder(self) -> Result<LanguageBuilder, DefinitionError> {
        let LanguageDesc {
            name,
            extensions,
            keywords,
            allow_shadowed_keywords,
            styles,
            lexer,
            syntax,
        } = self;

        let mut builder = LanguageBuilder::new(&name)
            .attributes(lexer.attributes(syntax.block_comment.is_some())?)
            .duplicate_policy(if allow_shadowed_keywords {
                DuplicatePolicy::FirstWins
            } else {
                DuplicatePolicy::Reject
            });

        for ext in &extensions {
            builder = builder.extension(ext);
        }
        for group in &keywords {
            let lookup = if group.sorted {
                KeywordLookup::BinarySearch
            } else {
                KeywordLookup::Hashed
            };
            builder = builder.keywords(&group.name, group.kind, lookup, group.words.iter());
        }
        for style in &styles {
            builder = builder.style(
                StyleRule::new(style.kind, &style.name, &style.attributes)
                    .with_sub_styles(style.sub_styles),
            );
        }

        if let Some(marker) = &syntax.line_comment {
            builder = builder.line_comment(marker);
        }
        if let Some(block) = &syntax.block_comment {
            builder = builder.block_comment(&block.open, &block.close);
        }
        for quote in syntax.quotes.chars() {
            builder = builder.quote(quote);
        }
        builder = builder
            .operator_chars(&syntax.operator_chars)
            .ident_chars(&syntax.ident_chars);
        for op in &syntax.operators {
            builder = builder.operator(op);
        }
        for pair in &syntax.fold_pairs {
            builder = builder.fold_pair(&pair.open, &pair.close);
        }
        for sigil in syntax.sigils {
            builder = builder.sigil(sigil.into_rule());
        }
        Ok(builder)
    }
}

impl LexerDesc {
    fn attributes(&self, has_delimiters: bool) -> Result<LexerAttributes, DefinitionError> {
        let escape = match self.escape {
            Some(ch) => {
                let byte = u8::try_from(ch)
                    .ok()
                    .filter(u8::is_ascii_graphic)
                    .ok_or(DefinitionError::NonAscii {
                        what: "escape character",
                        ch,
                    })?;
                Some(Escape {
                    byte,
                    form: self.escape_form,
                })
            }
            None => None,
        };

        let mut flags = LexerFlags::empty();
        flags.set(
            LexerFlags::NO_BLOCK_COMMENT,
            !self.has_block_comment.unwrap_or(has_delimiters),
        );
        flags.set(LexerFlags::NESTED_COMMENTS, self.nested_comments);
        flags.set(LexerFlags::MULTILINE_STRINGS, self.multiline_strings);
        flags.set(LexerFlags::SIGNED_NUMBERS, self.signed_numbers);
        flags.set(LexerFlags::LABELS, self.labels);

        let mut fold = FoldFlags::empty();
        fold.set(FoldFlags::DELIMITERS, self.fold_delimiters);
        fold.set(FoldFlags::BLOCK_COMMENT, self.fold_block_comments);

        Ok(LexerAttributes {
            tab_width: self.tab_width,
            indent_width: self.indent_width,
            escape,
            operator_kind: self.operator_kind,
            fold,
            flags,
        })
    }
}

impl SigilDesc {
    fn into_rule(self) -> SigilRule {
        let mut rule = SigilRule::new(self.sigil, self.kind).sub_style(self.sub);
        rule.quoted_sub = self.quoted_sub;
        rule.standalone = self.standalone;
        rule.call_kind = self.call_kind;
        rule.prefixes = self
            .prefixes
            .into_iter()
            .map(|p| (p.text.into_boxed_str(), p.kind))
            .collect();
        rule.declaration = self
            .declaration
            .map(|d| (d.text.into_boxed_str(), d.kind));
        rule
    }
}
