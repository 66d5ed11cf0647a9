//! Bit flags describing lexer behavior and per-byte character classes.

use bitflags::bitflags;

bitflags! {
    /// Scalar lexer switches carried by a language definition.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct LexerFlags: u16 {
        /// The language has no block comments. Must agree with the
        /// presence of block comment delimiters.
        const NO_BLOCK_COMMENT = 1 << 0;
        /// Block comments nest (`/* /* */ */` is one comment).
        const NESTED_COMMENTS = 1 << 1;
        /// Unterminated strings continue on the next line.
        const MULTILINE_STRINGS = 1 << 2;
        /// A `+` or `-` directly followed by a digit starts a number.
        const SIGNED_NUMBERS = 1 << 3;
        /// An identifier directly followed by `:` is a label.
        const LABELS = 1 << 4;
    }
}

bitflags! {
    /// Which token structures contribute to fold levels.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FoldFlags: u8 {
        /// Fold delimiter pairs (`{` / `}` and friends).
        const DELIMITERS = 1 << 0;
        /// Outermost block comments spanning several lines.
        const BLOCK_COMMENT = 1 << 1;
    }
}

bitflags! {
    /// Per-byte classification, precomputed when a definition is built.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct CharClass: u8 {
        const IDENT_START = 1 << 0;
        const IDENT_CONTINUE = 1 << 1;
        const OPERATOR = 1 << 2;
        const QUOTE = 1 << 3;
        const SIGIL = 1 << 4;
        const DIGIT = 1 << 5;
        const WHITESPACE = 1 << 6;
    }
}

/// Lookup table from byte to [`CharClass`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharClasses([CharClass; 256]);

impl CharClasses {
    /// Base table: ASCII letters and `_` start identifiers, alphanumerics
    /// continue them, space/tab/FF/VT are whitespace.
    pub(crate) fn ascii_base() -> Self {
        let mut table = [CharClass::empty(); 256];
        for b in 0..=255u8 {
            let mut class = CharClass::empty();
            if b.is_ascii_alphabetic() || b == b'_' {
                class |= CharClass::IDENT_START | CharClass::IDENT_CONTINUE;
            }
            if b.is_ascii_digit() {
                class |= CharClass::IDENT_CONTINUE | CharClass::DIGIT;
            }
            if matches!(b, b' ' | b'\t' | 0x0B | 0x0C) {
                class |= CharClass::WHITESPACE;
            }
            table[usize::from(b)] = class;
        }
        CharClasses(table)
    }

    pub(crate) fn insert(&mut self, byte: u8, class: CharClass) {
        self.0[usize::from(byte)] |= class;
    }

    #[inline]
    pub fn get(&self, byte: u8) -> CharClass {
        self.0[usize::from(byte)]
    }

    #[inline]
    pub fn is(&self, byte: u8, class: CharClass) -> bool {
        self.get(byte).intersects(class)
    }
}
