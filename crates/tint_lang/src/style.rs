//! Style rules: token kind to display attributes.
//!
//! Display attributes are opaque to the engine. Strings like
//! `"bold; fore:#A46000"` are stored verbatim and handed to the renderer;
//! nothing in the lexing path inspects them.

use rustc_hash::FxHashMap;

use crate::error::DefinitionError;
use crate::kind::{SubStyle, TokenKind};

/// Opaque renderer attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Attributes(Box<str>);

impl Attributes {
    pub fn new(raw: impl Into<Box<str>>) -> Self {
        Attributes(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Display attributes shared by a token kind and its sub-styles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    pub kind: TokenKind,
    /// Number of sub-styles this rule covers (1 for a plain style).
    pub sub_styles: u8,
    /// Human-readable style name (`Keyword`, `Escape Sequence`, ...).
    pub name: Box<str>,
    pub attributes: Attributes,
}

impl StyleRule {
    pub fn new(kind: TokenKind, name: &str, attributes: &str) -> Self {
        StyleRule {
            kind,
            sub_styles: 1,
            name: name.into(),
            attributes: Attributes::new(attributes),
        }
    }

    /// A rule covering `count` sub-styles of `kind`.
    #[must_use]
    pub fn with_sub_styles(mut self, count: u8) -> Self {
        self.sub_styles = count.max(1);
        self
    }

    pub fn covers(&self, sub: SubStyle) -> bool {
        sub.0 < self.sub_styles
    }
}

/// Style rules indexed by token kind.
#[derive(Clone, Debug, Default)]
pub struct StyleTable {
    rules: Vec<StyleRule>,
    by_kind: FxHashMap<TokenKind, usize>,
}

impl StyleTable {
    pub fn new(rules: Vec<StyleRule>) -> Result<Self, DefinitionError> {
        let mut by_kind = FxHashMap::default();
        for (i, rule) in rules.iter().enumerate() {
            if by_kind.insert(rule.kind, i).is_some() {
                return Err(DefinitionError::DuplicateStyle { kind: rule.kind });
            }
        }
        Ok(StyleTable { rules, by_kind })
    }

    /// Rule for `kind`, if the language styles it.
    pub fn rule(&self, kind: TokenKind) -> Option<&StyleRule> {
        self.by_kind.get(&kind).map(|&i| &self.rules[i])
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
