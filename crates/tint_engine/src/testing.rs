//! Definitions shared by unit tests.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::sync::Arc;

use tint_lang::{
    Escape, EscapeForm, FoldFlags, KeywordLookup, LanguageDefinition, LexerAttributes, LexerFlags,
    TokenKind,
};

use crate::stream::TokenStream;

pub(crate) fn llvm() -> Arc<LanguageDefinition> {
    tint_lang::languages::llvm().unwrap()
}

/// Brace language with nested block comments, multi-line strings, and
/// block comments that fold.
pub(crate) fn c_like() -> Arc<LanguageDefinition> {
    LanguageDefinition::builder("C-ish")
        .attributes(LexerAttributes {
            escape: Some(Escape {
                byte: b'\\',
                form: EscapeForm::SingleChar,
            }),
            fold: FoldFlags::DELIMITERS | FoldFlags::BLOCK_COMMENT,
            flags: LexerFlags::NESTED_COMMENTS | LexerFlags::MULTILINE_STRINGS,
            ..LexerAttributes::default()
        })
        .keywords("keywords", TokenKind::Keyword, KeywordLookup::Hashed, ["if", "else", "return"])
        .style(tint_lang::StyleRule::new(TokenKind::Comment, "Comment", "fore:#608060"))
        .style(tint_lang::StyleRule::new(TokenKind::String, "String", "fore:#008000"))
        .style(tint_lang::StyleRule::new(TokenKind::Escape, "Escape", "fore:#0080C0"))
        .line_comment("//")
        .block_comment("/*", "*/")
        .quote('"')
        .operator_chars("{}()=;+-*/<>")
        .fold_pair("{", "}")
        .build()
        .unwrap()
}

/// Fresh full scan, for comparing against incremental results.
pub(crate) fn full(def: &LanguageDefinition, text: &str) -> TokenStream {
    TokenStream::scan(def, text.as_bytes())
}
