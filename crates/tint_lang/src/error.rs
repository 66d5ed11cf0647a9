//! Language definition configuration errors.
//!
//! All of these are detected while a definition is built, never while
//! scanning. A definition that builds successfully cannot make the scanner
//! fail.

use crate::kind::TokenKind;

/// A language definition that cannot be used by the scanner.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("keyword group `{group}` contains an empty keyword")]
    EmptyKeyword { group: String },

    #[error("keyword `{word}` in group `{group}` is not a single lexeme")]
    InvalidKeyword { group: String, word: String },

    #[error("keyword `{word}` appears twice in group `{group}`")]
    DuplicateInGroup { group: String, word: String },

    #[error("keyword `{word}` appears in group `{first}` and again in group `{second}`")]
    DuplicateAcrossGroups {
        word: String,
        first: String,
        second: String,
    },

    #[error("group `{group}` is declared pre-sorted but `{word}` follows `{previous}`")]
    UnsortedGroup {
        group: String,
        previous: String,
        word: String,
    },

    #[error("{what} must be at least 1")]
    ZeroWidth { what: &'static str },

    #[error("{what} `{ch}` must be a printable ASCII character")]
    NonAscii { what: &'static str, ch: char },

    #[error("{what} must not be empty")]
    Empty { what: &'static str },

    #[error("block comment delimiters are set but the language is flagged as having no block comments")]
    BlockCommentConflict,

    #[error("the language has block comments but no delimiters")]
    MissingBlockComment,

    #[error("nested comments require block comments")]
    NestedWithoutBlockComment,

    #[error("fold delimiter `{delimiter}` is not scanned as an operator")]
    FoldPairNotOperator { delimiter: String },

    #[error("more than one style rule for `{kind}`")]
    DuplicateStyle { kind: TokenKind },

    #[error("sigil `{sigil}` is declared more than once")]
    DuplicateSigil { sigil: char },
}
