//! `edit`: replay one edit through the incremental engine and report what
//! was re-lexed.

use std::io::{self, Write};
use std::ops::Range;

use tint_engine::{Change, Document};

use super::lex::load;
use super::{finish, Options};

/// Parse `start..end`, or a bare offset for an insertion.
pub fn parse_edit_range(raw: &str) -> Result<Range<usize>, String> {
    let number = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid offset '{s}' in range '{raw}'"))
    };
    match raw.split_once("..") {
        Some((start, end)) => Ok(number(start)?..number(end)?),
        None => {
            let at = number(raw)?;
            Ok(at..at)
        }
    }
}

/// Expand `\n`, `\r`, `\t` and `\\` in replacement text given on the
/// command line.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn write_change(out: &mut impl Write, change: &Change) -> io::Result<()> {
    writeln!(out, "  outcome:  {:?}", change.outcome)?;
    writeln!(
        out,
        "  lines:    {}..{} ({:+} total)",
        change.lines.start, change.lines.end, change.line_delta
    )?;
    writeln!(out, "  bytes:    {}..{}", change.bytes.start, change.bytes.end)?;
    writeln!(out, "  folds:    {}..{}", change.folds.start, change.folds.end)?;
    writeln!(
        out,
        "  scanned:  {} lines, {} bytes; reused {} lines ({:.1}%)",
        change.stats.scanned_lines,
        change.stats.scanned_bytes,
        change.stats.reused_lines,
        change.stats.reuse_rate()
    )
}

fn report(out: &mut impl Write, doc: &mut Document, change: &Change, budget: Option<usize>) -> io::Result<()> {
    writeln!(out, "Edit:")?;
    write_change(out, change)?;
    let mut pass = 0;
    while let Some(stale) = doc.highlights().stale_from() {
        pass += 1;
        writeln!(out, "Resume {pass} (stale from line {stale}):")?;
        match doc.resume(budget) {
            Some(change) => write_change(out, &change)?,
            None => break,
        }
    }
    Ok(())
}

/// Apply `text` over `range` in the file at `path` and show the re-lex,
/// followed by any resumes needed to clear lines left stale by
/// `--max-relex`.
pub fn edit_file(path: &str, range: &str, text: &str, options: &Options) {
    let range = match parse_edit_range(range) {
        Ok(range) => range,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(1);
        }
    };
    let mut doc = load(path, options);
    let change = match doc.replace(range, &unescape(text)) {
        Ok(change) => change,
        Err(e) => {
            eprintln!("cannot apply edit to '{path}': {e}");
            std::process::exit(1);
        }
    };
    finish(report(&mut io::stdout().lock(), &mut doc, &change, options.max_relex));
}
