//! Edits.
//!
//! The engine only needs the shape of an edit: which byte range of the old
//! text was replaced and how long the replacement is. [`TextEdit`] carries
//! the replacement text too, for callers that let a
//! [`Document`](crate::Document) apply edits to its own buffer.
//!
//! # Composition
//!
//! Successive edits fold into one with [`Edit::then`], so a burst of
//! keystrokes can be re-lexed once for the final text.

use tint_scan::{offset, shift, Span};

/// Replacement of `span` in the old text by `new_len` bytes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Edit {
    pub span: Span,
    pub new_len: u32,
}

impl Edit {
    /// Create a replacement edit.
    pub fn replace(span: Span, new_len: u32) -> Self {
        Edit { span, new_len }
    }

    /// Create an insertion of `len` bytes at `at`.
    pub fn insert(at: u32, len: u32) -> Self {
        Edit {
            span: Span::new(at, at),
            new_len: len,
        }
    }

    /// Create a deletion edit.
    pub fn delete(span: Span) -> Self {
        Edit { span, new_len: 0 }
    }

    /// Length change this edit causes. Positive when text grows.
    pub fn delta(&self) -> i64 {
        i64::from(self.new_len) - i64::from(self.span.len())
    }

    /// End of the replacement in new-text coordinates.
    pub fn new_end(&self) -> u32 {
        self.span.start + self.new_len
    }

    /// Length of the text after applying this edit to text of `old_len`
    /// bytes, or `None` when the edit does not fit.
    pub fn apply_to_len(&self, old_len: u32) -> Option<u32> {
        if self.span.end > old_len {
            return None;
        }
        u32::try_from(i64::from(old_len) + self.delta()).ok()
    }

    /// A single edit equivalent to `self` followed by `next`, where `next`
    /// is expressed in the coordinates of the text produced by `self`.
    ///
    /// The result may cover more than the two edits touched; bytes between
    /// them are treated as replaced by themselves.
    #[must_use]
    pub fn then(self, next: Edit) -> Edit {
        let lo = self.span.start.min(next.span.start);
        let hi = self.new_end().max(next.span.end);
        let old_hi = shift(hi, -self.delta());
        let new_len = shift(hi - lo, next.delta());
        Edit {
            span: Span::new(lo, old_hi),
            new_len,
        }
    }
}

/// A text edit that modifies a buffer.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TextEdit {
    /// The span to replace (empty span for insert).
    pub span: Span,
    pub new_text: String,
}

impl TextEdit {
    /// Create a replacement edit.
    pub fn replace(span: Span, new_text: impl Into<String>) -> Self {
        TextEdit {
            span,
            new_text: new_text.into(),
        }
    }

    /// Create an insertion edit.
    pub fn insert(at: u32, text: impl Into<String>) -> Self {
        TextEdit {
            span: Span::new(at, at),
            new_text: text.into(),
        }
    }

    /// Create a deletion edit.
    pub fn delete(span: Span) -> Self {
        TextEdit {
            span,
            new_text: String::new(),
        }
    }

    /// Length change this edit would cause.
    pub fn length_delta(&self) -> i64 {
        let removed = i64::from(self.span.len());
        let added = i64::try_from(self.new_text.len()).unwrap_or(i64::MAX);
        added - removed
    }

    /// The shape of this edit, for the engine.
    pub fn to_edit(&self) -> Edit {
        Edit::replace(self.span, offset(self.new_text.len()))
    }
}
