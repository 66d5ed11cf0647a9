//! `lex` and `folds`: inspect the token stream and fold table of a file.

use std::io::{self, Write};

use tint_engine::{Document, Highlights, Span};

use super::{finish, read_file, resolve_language, Options};

fn excerpt(text: &str, span: Span) -> &str {
    text.get(span.to_range()).unwrap_or("")
}

/// Write one line per token, with escape sequences listed under the
/// string that holds them.
pub fn write_tokens(out: &mut impl Write, text: &str, highlights: &Highlights) -> io::Result<()> {
    let stream = highlights.stream();
    for token in stream.tokens() {
        let sub = if token.sub.0 == 0 {
            String::new()
        } else {
            format!("/{}", token.sub.0)
        };
        writeln!(
            out,
            "  {}{sub} @ {}..{} {:?}",
            token.kind,
            token.span.start,
            token.span.end,
            excerpt(text, token.span)
        )?;
        for escape in stream.escapes_in(token.span) {
            writeln!(
                out,
                "    escape @ {}..{} {:?}",
                escape.start,
                escape.end,
                excerpt(text, *escape)
            )?;
        }
    }
    Ok(())
}

/// Write each line's fold level, marking headers with `+`.
pub fn write_folds(out: &mut impl Write, text: &str, highlights: &Highlights) -> io::Result<()> {
    for line in 0..highlights.line_count() {
        let Some(fold) = highlights.fold_level(line) else {
            continue;
        };
        let content = highlights
            .line_span(line)
            .map(|span| excerpt(text, span).trim_end_matches(['\r', '\n']))
            .unwrap_or("");
        let marker = if fold.header { '+' } else { ' ' };
        writeln!(out, "{:>5} {:>3}{marker} | {content}", line + 1, fold.level)?;
    }
    Ok(())
}

pub(super) fn load(path: &str, options: &Options) -> Document {
    let content = read_file(path);
    let def = resolve_language(Some(path), options);
    match Document::with_config(def, content, options.engine_config()) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("cannot lex '{path}': {e}");
            std::process::exit(1);
        }
    }
}

/// Lex a file and display the token stream.
pub fn lex_file(path: &str, options: &Options) {
    let doc = load(path, options);
    let highlights = doc.highlights();
    println!(
        "Tokens for '{}' ({}, {} tokens):",
        path,
        highlights.definition().name(),
        highlights.stream().tokens().len()
    );
    finish(write_tokens(&mut io::stdout().lock(), doc.text(), highlights));
}

/// Lex a file and display its fold levels.
pub fn show_folds(path: &str, options: &Options) {
    let doc = load(path, options);
    println!("Folds for '{path}' ({} lines):", doc.highlights().line_count());
    finish(write_folds(&mut io::stdout().lock(), doc.text(), doc.highlights()));
}
