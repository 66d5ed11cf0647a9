//! A text buffer paired with its engine.
//!
//! [`Document`] validates edits against its own text, applies them, and
//! re-lexes, so callers that don't already own a buffer structure get the
//! engine without keeping offsets in sync themselves.

use std::ops::Range;
use std::sync::Arc;

use tint_lang::LanguageDefinition;
use tint_scan::Span;

use crate::config::EngineConfig;
use crate::edit::TextEdit;
use crate::engine::{Change, Engine};
use crate::error::{check_size, EditError};
use crate::highlights::Highlights;

#[derive(Debug)]
pub struct Document {
    text: String,
    engine: Engine,
}

impl Document {
    pub fn new(def: Arc<LanguageDefinition>, text: impl Into<String>) -> Result<Self, EditError> {
        Self::with_config(def, text, EngineConfig::default())
    }

    pub fn with_config(
        def: Arc<LanguageDefinition>,
        text: impl Into<String>,
        config: EngineConfig,
    ) -> Result<Self, EditError> {
        let text = text.into();
        let engine = Engine::with_config(def, &text, config)?;
        Ok(Document { text, engine })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn highlights(&self) -> &Highlights {
        self.engine.highlights()
    }

    pub fn snapshot(&self) -> Arc<Highlights> {
        self.engine.snapshot()
    }

    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<Change, EditError> {
        self.check_range(&range)?;
        check_size(self.text.len() - range.len() + text.len())?;
        let edit = TextEdit::replace(Span::from_range(range.clone()), text);
        self.text.replace_range(range, text);
        Ok(self.engine.edit(&self.text, edit.to_edit()))
    }

    pub fn insert(&mut self, at: usize, text: &str) -> Result<Change, EditError> {
        self.replace(at..at, text)
    }

    pub fn delete(&mut self, range: Range<usize>) -> Result<Change, EditError> {
        self.replace(range, "")
    }

    /// Apply several edits, all in the coordinates of the current text, and
    /// re-lex once. Edits may touch but not overlap; inserts at the same
    /// offset keep their order of appearance.
    pub fn apply(&mut self, edits: impl IntoIterator<Item = TextEdit>) -> Result<Option<Change>, EditError> {
        let mut sorted: Vec<TextEdit> = edits.into_iter().collect();
        for edit in &sorted {
            self.check_range(&edit.span.to_range())?;
        }
        // Stable sort: reversing first applies same-offset inserts last to first.
        sorted.reverse();
        sorted.sort_by(|a, b| {
            b.span
                .start
                .cmp(&a.span.start)
                .then(b.span.end.cmp(&a.span.end))
        });
        for pair in sorted.windows(2) {
            let (later, earlier) = (&pair[0], &pair[1]);
            if earlier.span.end > later.span.start {
                return Err(EditError::Overlap {
                    first: earlier.span,
                    second: later.span,
                });
            }
        }
        let total: i64 = sorted.iter().map(TextEdit::length_delta).sum();
        let new_len = i64::try_from(self.text.len()).unwrap_or(i64::MAX) + total;
        check_size(usize::try_from(new_len).unwrap_or(usize::MAX))?;

        // Back to front, so each edit's offsets are still valid.
        for edit in &sorted {
            self.text.replace_range(edit.span.to_range(), &edit.new_text);
            self.engine.defer_edit(edit.to_edit());
        }
        Ok(self.engine.flush(&self.text))
    }

    /// Continue a budget-limited re-lex. See [`Engine::resume`].
    pub fn resume(&mut self, budget: Option<usize>) -> Option<Change> {
        self.engine.resume(&self.text, budget)
    }

    pub fn rescan(&mut self) -> Change {
        self.engine.rescan(&self.text)
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), EditError> {
        if range.start > range.end {
            return Err(EditError::Inverted {
                start: range.start,
                end: range.end,
            });
        }
        let len = self.text.len();
        for offset in [range.start, range.end] {
            if offset > len {
                return Err(EditError::OutOfBounds { offset, len });
            }
            if !self.text.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary { offset });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
