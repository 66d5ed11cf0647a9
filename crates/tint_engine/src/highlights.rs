//! Committed lexing results.
//!
//! A [`Highlights`] value is everything a reader needs: the definition the
//! buffer was scanned with, the token stream, the fold table, and the first
//! stale line, if any. The engine shares it as `Arc<Highlights>` and updates
//! it copy-on-write, so a reader holding an older `Arc` keeps a consistent
//! view while the writer moves on.

use std::ops::Range;
use std::sync::Arc;

use parking_lot::RwLock;
use tint_lang::LanguageDefinition;

use crate::fold::FoldTable;
use crate::relex::Region;
use crate::stream::TokenStream;

#[derive(Clone, Debug)]
pub struct Highlights {
    def: Arc<LanguageDefinition>,
    stream: TokenStream,
    folds: FoldTable,
    stale: Option<usize>,
    revision: u64,
}

impl Highlights {
    pub(crate) fn scan(def: Arc<LanguageDefinition>, text: &[u8]) -> Self {
        let stream = TokenStream::scan(&def, text);
        let folds = FoldTable::compute(stream.lines());
        Highlights {
            def,
            stream,
            folds,
            stale: None,
            revision: 0,
        }
    }

    pub fn definition(&self) -> &Arc<LanguageDefinition> {
        &self.def
    }

    pub fn stream(&self) -> &TokenStream {
        &self.stream
    }

    pub fn folds(&self) -> &FoldTable {
        &self.folds
    }

    /// First line whose tokens are left over from before an edit.
    pub fn stale_from(&self) -> Option<usize> {
        self.stale
    }

    /// Bumped on every committed change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace everything with a fresh scan of `text`.
    pub(crate) fn rescan(&mut self, text: &[u8]) {
        self.stream = TokenStream::scan(&self.def, text);
        self.folds = FoldTable::compute(self.stream.lines());
        self.stale = None;
        self.revision += 1;
    }

    /// Run `relex` against the stream, then bring folds and the stale mark
    /// up to date. Returns the region and the fold rows touched.
    pub(crate) fn apply<F>(&mut self, relex: F) -> Option<(Region, Range<usize>)>
    where
        F: FnOnce(&mut TokenStream, &LanguageDefinition) -> Option<Region>,
    {
        let region = relex(&mut self.stream, &self.def)?;
        let folds = self.folds.update(
            self.stream.lines(),
            region.first,
            region.old_end,
            region.new_end,
        );

        let capped = region.outcome == crate::relex::Outcome::Capped;
        self.stale = match self.stale {
            Some(s) if s < region.first => Some(s),
            // Re-scanned lines chain from their predecessors, so any break
            // is at or past the end of the region.
            Some(_) => self.stream.first_break(region.first),
            None if capped => self.stream.first_break(region.first),
            None => None,
        };
        self.revision += 1;
        Some((region, folds))
    }
}

/// Last committed [`Highlights`], shared between an edit thread and
/// readers such as a render thread.
#[derive(Debug)]
pub struct SharedHighlights {
    current: RwLock<Arc<Highlights>>,
}

impl SharedHighlights {
    pub fn new(initial: Arc<Highlights>) -> Self {
        SharedHighlights {
            current: RwLock::new(initial),
        }
    }

    /// The latest published snapshot.
    pub fn load(&self) -> Arc<Highlights> {
        Arc::clone(&self.current.read())
    }

    pub fn store(&self, next: Arc<Highlights>) {
        *self.current.write() = next;
    }
}
