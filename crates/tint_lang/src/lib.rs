//! Language definitions for the Tint lexing engine.
//!
//! A language is described entirely by data: ordered keyword groups, style
//! rules with opaque display attributes, scalar lexer attributes, and the
//! lexical rule tables (comments, quotes, operators, sigils, fold pairs).
//! Definitions are validated once when built and then shared read-only.
//!
//! # Building a Definition
//!
//! ```
//! use tint_lang::{KeywordLookup, LanguageDefinition, TokenKind};
//!
//! let def = LanguageDefinition::builder("Tiny")
//!     .line_comment("#")
//!     .quote('"')
//!     .operator_chars("=+-")
//!     .keywords("keywords", TokenKind::Keyword, KeywordLookup::Hashed, ["let", "if"])
//!     .build()
//!     .map_err(|e| e.to_string())?;
//! assert_eq!(def.classify("let", false).map(|m| m.group), Some(0));
//! # Ok::<(), String>(())
//! ```

mod definition;
mod desc;
mod error;
mod flags;
mod keywords;
mod kind;
pub mod languages;
mod style;
mod syntax;

pub use definition::{LanguageBuilder, LanguageDefinition, LexerAttributes};
pub use desc::{
    DelimiterDesc, KeywordGroupDesc, LanguageDesc, LexerDesc, PrefixDesc, SigilDesc, StyleDesc,
    SyntaxDesc, Words,
};
pub use error::DefinitionError;
pub use flags::{CharClass, CharClasses, FoldFlags, LexerFlags};
pub use keywords::{DuplicatePolicy, KeywordGroup, KeywordLookup, KeywordMatch, KeywordTable};
pub use kind::{SubStyle, TokenKind};
pub use style::{Attributes, StyleRule, StyleTable};
pub use syntax::{utf8_len, BlockComment, Escape, EscapeForm, FoldPair, SigilRule};
