//! The engine facade: owns the committed [`Highlights`] and turns edits
//! into [`Change`] notifications.
//!
//! The caller owns the text. Every call that takes `text` expects the
//! buffer as it is after all edits reported so far.

use std::ops::Range;
use std::sync::Arc;

use tint_lang::LanguageDefinition;
use tint_scan::{offset, Span};

use crate::config::EngineConfig;
use crate::edit::Edit;
use crate::error::{check_size, EditError};
use crate::highlights::{Highlights, SharedHighlights};
use crate::relex::{self, Outcome, Region, RelexStats};

/// What a re-lex changed.
#[derive(Clone, Debug, PartialEq)]
pub struct Change {
    /// Re-scanned lines, as new line indices.
    pub lines: Range<usize>,
    /// Re-scanned bytes, in new-text coordinates.
    pub bytes: Span,
    /// Lines whose fold level or header flag may have changed.
    pub folds: Range<usize>,
    /// Change in the number of lines.
    pub line_delta: isize,
    pub stats: RelexStats,
    pub outcome: Outcome,
}

fn line_delta(old: usize, new: usize) -> isize {
    if new >= old {
        isize::try_from(new - old).unwrap_or(isize::MAX)
    } else {
        -isize::try_from(old - new).unwrap_or(isize::MAX)
    }
}

impl Change {
    fn from_region(region: Region, folds: Range<usize>, old_lines: usize, new_lines: usize) -> Self {
        Change {
            lines: region.first..region.new_end,
            bytes: region.bytes,
            folds,
            line_delta: line_delta(old_lines, new_lines),
            stats: region.stats,
            outcome: region.outcome,
        }
    }
}

/// Incremental lexer for one buffer.
///
/// Offsets are `u32`: the buffer must stay below 4 GiB. Construction
/// checks this; later calls trust the caller.
#[derive(Debug)]
pub struct Engine {
    highlights: Arc<Highlights>,
    config: EngineConfig,
    pending: Option<Edit>,
}

impl Engine {
    /// Scan `text` with the default configuration.
    pub fn new(def: Arc<LanguageDefinition>, text: &str) -> Result<Self, EditError> {
        Self::with_config(def, text, EngineConfig::default())
    }

    /// Scan `text`. Fails when it is too large to address.
    pub fn with_config(
        def: Arc<LanguageDefinition>,
        text: &str,
        config: EngineConfig,
    ) -> Result<Self, EditError> {
        check_size(text.len())?;
        Ok(Engine {
            highlights: Arc::new(Highlights::scan(def, text.as_bytes())),
            config,
            pending: None,
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the configuration; applies from the next edit.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    pub fn definition(&self) -> &Arc<LanguageDefinition> {
        self.highlights.definition()
    }

    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    /// The current highlights. Later edits do not affect a snapshot.
    pub fn snapshot(&self) -> Arc<Highlights> {
        Arc::clone(&self.highlights)
    }

    /// Make the current highlights visible to readers of `shared`.
    pub fn publish(&self, shared: &SharedHighlights) {
        shared.store(self.snapshot());
    }

    /// Whether a capped re-lex left lines to resume.
    pub fn is_stale(&self) -> bool {
        self.highlights.stale_from().is_some()
    }

    /// Whether deferred edits are waiting for [`flush`](Self::flush).
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Re-lex after `edit`; `text` is the buffer after it. Any deferred
    /// edits are folded in first.
    pub fn edit(&mut self, text: &str, edit: Edit) -> Change {
        let edit = match self.pending.take() {
            Some(pending) => pending.then(edit),
            None => edit,
        };
        self.relex(text, edit)
    }

    /// Record an edit without re-lexing. Successive deferred edits are
    /// composed and re-lexed together by [`flush`](Self::flush).
    pub fn defer_edit(&mut self, edit: Edit) {
        self.pending = Some(match self.pending.take() {
            Some(pending) => pending.then(edit),
            None => edit,
        });
    }

    /// Re-lex the deferred edits, if any.
    pub fn flush(&mut self, text: &str) -> Option<Change> {
        let edit = self.pending.take()?;
        Some(self.relex(text, edit))
    }

    /// Continue a re-lex left stale by the byte budget, scanning at most
    /// `budget` bytes past the stale line. Returns `None` when nothing is
    /// stale.
    pub fn resume(&mut self, text: &str, budget: Option<usize>) -> Option<Change> {
        if let Some(change) = self.flush(text) {
            return Some(change);
        }
        let line = self.highlights.stale_from()?;
        let old_lines = self.highlights.line_count();
        let highlights = Arc::make_mut(&mut self.highlights);
        let applied = highlights.apply(|stream, def| relex::resume(stream, def, text.as_bytes(), line, budget));
        match applied {
            Some((region, folds)) => {
                let new_lines = highlights.line_count();
                Some(Change::from_region(region, folds, old_lines, new_lines))
            }
            None => Some(self.rescan(text)),
        }
    }

    /// Discard all state and scan `text` from scratch.
    pub fn rescan(&mut self, text: &str) -> Change {
        self.pending = None;
        let old_lines = self.highlights.line_count();
        let highlights = Arc::make_mut(&mut self.highlights);
        highlights.rescan(text.as_bytes());
        let lines = highlights.line_count();
        Change {
            lines: 0..lines,
            bytes: Span::new(0, offset(text.len())),
            folds: 0..lines,
            line_delta: line_delta(old_lines, lines),
            stats: RelexStats {
                scanned_lines: lines,
                reused_lines: 0,
                scanned_bytes: text.len(),
            },
            outcome: Outcome::FullRescan,
        }
    }

    fn relex(&mut self, text: &str, edit: Edit) -> Change {
        let budget = self.config.max_relex_bytes;
        let old_lines = self.highlights.line_count();
        let highlights = Arc::make_mut(&mut self.highlights);
        let applied = highlights.apply(|stream, def| relex::relex(stream, def, text.as_bytes(), edit, budget));
        match applied {
            Some((region, folds)) => {
                let change = Change::from_region(region, folds, old_lines, highlights.line_count());
                tracing::debug!(
                    outcome = ?change.outcome,
                    lines = ?change.lines,
                    reuse = change.stats.reuse_rate(),
                    "relexed"
                );
                change
            }
            None => {
                tracing::warn!("falling back to a full rescan");
                self.rescan(text)
            }
        }
    }
}

#[cfg(test)]
mod tests;
