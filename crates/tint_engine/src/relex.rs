//! Incremental re-lexing.
//!
//! After an edit the controller re-scans line by line from the line holding
//! the edit start. Once past the edited bytes, before each line it maps the
//! line start back into the old text; if an old line starts there and was
//! entered in the same [`ScanState`], every later old line would scan to the
//! same tokens, so they are reused (shifted by the length delta) and the
//! scan stops.
//!
//! With a byte budget the scan may also stop early. The old lines from that
//! point are kept as they were and the first of them becomes a *stale*
//! line: its recorded entry state no longer matches its predecessor's exit
//! state. [`resume`] continues from a stale line.

use tint_lang::LanguageDefinition;
use tint_scan::{line_at, offset, shift, ScanState, Scanner, Span, TokenBuf};

use crate::edit::Edit;
use crate::stream::{LineEntry, TokenStream};

/// How a re-lex ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Entry state matched an old line; the rest was reused.
    Converged,
    /// Scanned through the last line.
    EndOfBuffer,
    /// Stopped at the byte budget; the rest is stale.
    Capped,
    /// The whole buffer was scanned from scratch.
    FullRescan,
}

/// Statistics for one re-lex.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RelexStats {
    pub scanned_lines: usize,
    pub reused_lines: usize,
    pub scanned_bytes: usize,
}

impl RelexStats {
    /// Share of lines reused, as a percentage.
    #[allow(
        clippy::cast_precision_loss,
        reason = "line counts won't approach 2^52; precision loss irrelevant for display"
    )]
    pub fn reuse_rate(&self) -> f64 {
        let total = self.reused_lines + self.scanned_lines;
        if total == 0 {
            0.0
        } else {
            (self.reused_lines as f64 / total as f64) * 100.0
        }
    }
}

/// Lines replaced by a re-lex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Region {
    pub first: usize,
    /// End of the replaced lines, as old line indices.
    pub old_end: usize,
    /// End of the re-scanned lines, as new line indices.
    pub new_end: usize,
    /// Re-scanned bytes in new-text coordinates.
    pub bytes: Span,
    pub outcome: Outcome,
    pub stats: RelexStats,
}

enum Stop {
    Reuse(usize),
    Cap(usize),
    End,
}

/// Re-lex `stream`, which describes the text before `edit`, against `text`,
/// the text after it. Returns `None` when the edit does not fit the stream.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(start = edit.span.start, end = edit.span.end, new_len = edit.new_len)
)]
pub(crate) fn relex(
    stream: &mut TokenStream,
    def: &LanguageDefinition,
    text: &[u8],
    edit: Edit,
    budget: Option<usize>,
) -> Option<Region> {
    let fits = edit.apply_to_len(stream.len()).map(|len| len as usize) == Some(text.len());
    if !fits {
        tracing::warn!(
            old_len = stream.len(),
            new_len = text.len(),
            "edit does not match buffer lengths"
        );
        return None;
    }

    let mut first = stream.line_of(edit.span.start);
    // A line start may merge with the previous line's `\r`.
    if first > 0 && stream.lines()[first].start == edit.span.start {
        first -= 1;
    }
    // The recorded entry of a stale line is out of date.
    let entry = match first {
        0 => stream.lines()[0].entry,
        _ => stream.lines()[first - 1].exit,
    };
    Some(run(
        stream,
        Scanner::new(def),
        text,
        first,
        entry,
        edit.new_end(),
        edit.delta(),
        budget,
    ))
}

/// Continue re-lexing from the stale line `line`.
#[tracing::instrument(level = "debug", skip_all, fields(line = line))]
pub(crate) fn resume(
    stream: &mut TokenStream,
    def: &LanguageDefinition,
    text: &[u8],
    line: usize,
    budget: Option<usize>,
) -> Option<Region> {
    if line == 0 || line >= stream.line_count() || stream.len() as usize != text.len() {
        return None;
    }
    let entry = stream.lines()[line - 1].exit;
    let start = stream.lines()[line].start;
    Some(run(
        stream,
        Scanner::new(def),
        text,
        line,
        entry,
        start,
        0,
        budget,
    ))
}

/// Scan from line `first` (same start in old and new text) in state
/// `state`. Reuse is only considered at or past `dirty_end`.
#[allow(
    clippy::too_many_arguments,
    reason = "internal driver shared by edit and resume paths"
)]
fn run(
    stream: &mut TokenStream,
    scanner: Scanner<'_>,
    text: &[u8],
    first: usize,
    mut state: ScanState,
    dirty_end: u32,
    delta: i64,
    budget: Option<usize>,
) -> Region {
    let old_count = stream.line_count();
    let start = stream.lines()[first].start;
    let dirty_end = dirty_end as usize;
    let mut pos = start as usize;
    let mut buf = TokenBuf::new();
    let mut lines = Vec::new();

    let stop = loop {
        if pos >= dirty_end {
            if let Some(k) = stream.line_starting_at(shift(offset(pos), -delta)) {
                if stream.lines()[k].entry == state {
                    break Stop::Reuse(k);
                }
                if budget.is_some_and(|max| pos > dirty_end + max) {
                    break Stop::Cap(k);
                }
            }
        }
        let bounds = line_at(text, pos);
        let scan = scanner.scan_line(&text[bounds.range()], offset(pos), state, &mut buf);
        lines.push(LineEntry {
            start: offset(pos),
            entry: state,
            exit: scan.exit,
            fold: scan.fold,
        });
        state = scan.exit;
        pos = bounds.end;
        if !bounds.has_terminator() {
            break Stop::End;
        }
    };

    let (old_end, outcome) = match stop {
        Stop::Reuse(k) => (k, Outcome::Converged),
        Stop::Cap(k) => (k, Outcome::Capped),
        Stop::End => (old_count, Outcome::EndOfBuffer),
    };
    let stats = RelexStats {
        scanned_lines: lines.len(),
        reused_lines: old_count - old_end,
        scanned_bytes: pos - start as usize,
    };
    let new_end = first + lines.len();
    tracing::trace!(
        first,
        old_end,
        new_end,
        ?outcome,
        scanned = stats.scanned_lines,
        reused = stats.reused_lines,
        "relex stopped"
    );

    stream.splice(first..old_end, lines, buf, delta, offset(text.len()));
    Region {
        first,
        old_end,
        new_end,
        bytes: Span::new(start, offset(pos)),
        outcome,
        stats,
    }
}
