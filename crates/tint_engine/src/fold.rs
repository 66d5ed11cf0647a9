//! Fold levels.
//!
//! Line 0 sits at level 0. Each line's [`FoldDelta`](tint_scan::FoldDelta)
//! takes its level to the next line's level, with closers at level 0
//! absorbed. A line whose successor sits at a higher level is a fold
//! header.

use std::ops::Range;

use crate::stream::LineEntry;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FoldLevel {
    pub level: u32,
    pub header: bool,
}

/// One [`FoldLevel`] per line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FoldTable {
    levels: Vec<FoldLevel>,
}

impl FoldTable {
    pub fn compute(lines: &[LineEntry]) -> Self {
        let mut table = FoldTable::default();
        table.update(lines, 0, 0, lines.len());
        table
    }

    pub fn get(&self, line: usize) -> Option<FoldLevel> {
        self.levels.get(line).copied()
    }

    pub fn levels(&self) -> &[FoldLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Bring the table in line with `lines` after the old lines
    /// `first..old_end` were replaced by the new lines `first..new_end`.
    ///
    /// Recomputes from `first` and keeps going past `new_end` until a
    /// recomputed level matches the stored one. Returns the rows whose
    /// level or header flag may have changed.
    pub fn update(
        &mut self,
        lines: &[LineEntry],
        first: usize,
        old_end: usize,
        new_end: usize,
    ) -> Range<usize> {
        let old_end = old_end.min(self.levels.len());
        self.levels.splice(
            first..old_end,
            std::iter::repeat(FoldLevel::default()).take(new_end - first),
        );
        debug_assert_eq!(self.levels.len(), lines.len());

        let count = lines.len();
        let mut level = match first.checked_sub(1) {
            Some(prev) => lines[prev].fold.apply(self.levels[prev].level),
            None => 0,
        };
        let mut line = first;
        while line < count {
            if line >= new_end && self.levels[line].level == level {
                break;
            }
            self.levels[line].level = level;
            level = lines[line].fold.apply(level);
            line += 1;
        }

        let rows = first.saturating_sub(1)..line.min(count);
        for row in rows.clone() {
            let next = self.levels.get(row + 1).map(|l| l.level);
            self.levels[row].header = next.is_some_and(|next| next > self.levels[row].level);
        }
        rows
    }

    /// Last line of the region opened by the header at `line`, or `None`
    /// when `line` is not a header.
    pub fn fold_end(&self, line: usize) -> Option<usize> {
        let head = self.levels.get(line).filter(|l| l.header)?;
        let end = self.levels[line + 1..]
            .iter()
            .position(|l| l.level <= head.level)
            .map_or(self.levels.len() - 1, |offset| line + offset);
        Some(end)
    }
}
