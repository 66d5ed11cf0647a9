//! Token kinds and sub-styles.
//!
//! A token is styled by a [`TokenKind`] plus an orthogonal [`SubStyle`].
//! Sub-styles let one kind carry related variants (a quoted vs. unquoted
//! variable, an attribute vs. an attribute group) that share a style rule
//! without each variant needing its own slot in the kind enum.

use std::fmt;

use serde::Deserialize;

/// Closed set of token categories the scanner can produce.
///
/// Languages that need categories beyond the built-in set use
/// [`TokenKind::Custom`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Whitespace, line terminators, and characters with no other category.
    #[default]
    Default,
    Identifier,
    Keyword,
    TypeKeyword,
    Attribute,
    Instruction,
    Intrinsic,
    Metadata,
    Comdat,
    GlobalVariable,
    Variable,
    Function,
    Type,
    Comment,
    String,
    /// Escape sequence inside a string. Only produced as an overlay span,
    /// never as the kind of a stream token.
    Escape,
    Label,
    Number,
    Operator,
    /// Style not known: reported for lines past the re-lex look-ahead cap.
    Unknown,
    /// Language-specific category.
    Custom(u8),
}

impl TokenKind {
    /// Stable lowercase name, used by diagnostics and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Default => "default",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::TypeKeyword => "type_keyword",
            TokenKind::Attribute => "attribute",
            TokenKind::Instruction => "instruction",
            TokenKind::Intrinsic => "intrinsic",
            TokenKind::Metadata => "metadata",
            TokenKind::Comdat => "comdat",
            TokenKind::GlobalVariable => "global_variable",
            TokenKind::Variable => "variable",
            TokenKind::Function => "function",
            TokenKind::Type => "type",
            TokenKind::Comment => "comment",
            TokenKind::String => "string",
            TokenKind::Escape => "escape",
            TokenKind::Label => "label",
            TokenKind::Number => "number",
            TokenKind::Operator => "operator",
            TokenKind::Unknown => "unknown",
            TokenKind::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Custom(n) => write!(f, "custom({n})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Sub-style index within a [`TokenKind`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct SubStyle(pub u8);

impl SubStyle {
    /// The kind's primary style.
    pub const BASE: SubStyle = SubStyle(0);
    /// The first alternate style (quoted names, attribute groups, metadata strings).
    pub const ALT: SubStyle = SubStyle(1);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
