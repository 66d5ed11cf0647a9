#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::sync::Arc;

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tint_lang::{Escape, EscapeForm, KeywordLookup, LexerAttributes};

fn llvm() -> Arc<LanguageDefinition> {
    tint_lang::languages::llvm().unwrap()
}

/// A brace language with nested block comments and multi-line strings.
fn c_like(nested: bool) -> Arc<LanguageDefinition> {
    let mut flags = LexerFlags::MULTILINE_STRINGS;
    if nested {
        flags |= LexerFlags::NESTED_COMMENTS;
    }
    LanguageDefinition::builder("C-ish")
        .attributes(LexerAttributes {
            escape: Some(Escape {
                byte: b'\\',
                form: EscapeForm::SingleChar,
            }),
            fold: FoldFlags::DELIMITERS | FoldFlags::BLOCK_COMMENT,
            flags,
            ..LexerAttributes::default()
        })
        .keywords("keywords", TokenKind::Keyword, KeywordLookup::Hashed, ["if", "else", "return"])
        .line_comment("//")
        .block_comment("/*", "*/")
        .quote('"')
        .operator_chars("{}()=;+-*/<>")
        .operator("<<=")
        .operator("<<")
        .fold_pair("{", "}")
        .build()
        .unwrap()
}

fn lex<'t>(def: &LanguageDefinition, text: &'t str) -> Vec<(&'t str, TokenKind, u8)> {
    Scanner::new(def)
        .scan(text.as_bytes(), 0, ScanState::Normal)
        .tokens
        .iter()
        .map(|t| (&text[t.span.to_range()], t.kind, t.sub.0))
        .collect()
}

fn kinds<'t>(def: &LanguageDefinition, text: &'t str) -> Vec<(&'t str, TokenKind)> {
    lex(def, text)
        .into_iter()
        .filter(|(_, kind, _)| *kind != TokenKind::Default)
        .map(|(s, kind, _)| (s, kind))
        .collect()
}

fn line_scan(def: &LanguageDefinition, line: &str, entry: ScanState) -> LineScan {
    Scanner::new(def).scan_line(line.as_bytes(), 0, entry, &mut TokenBuf::new())
}

fn assert_tiles(text: &str, tokens: &[Token]) {
    let mut pos = 0;
    for token in tokens {
        assert_eq!(token.span.start, pos, "gap or overlap at {pos} in {text:?}");
        assert!(!token.span.is_empty(), "empty token in {text:?}");
        pos = token.span.end;
    }
    assert_eq!(pos as usize, text.len());
}

// ─── LLVM ───────────────────────────────────────────────────────────────

#[test]
fn function_header() {
    use TokenKind::*;
    assert_eq!(
        lex(&llvm(), "define i32 @main() {\n"),
        vec![
            ("define", Keyword, 0),
            (" ", Default, 0),
            ("i32", TypeKeyword, 0),
            (" ", Default, 0),
            ("@main", Function, 0),
            ("(", Operator, 0),
            (")", Operator, 0),
            (" ", Default, 0),
            ("{", Operator, 0),
            ("\n", Default, 0),
        ]
    );
}

#[test]
fn type_declaration_lookahead() {
    let def = llvm();
    assert_eq!(kinds(&def, "%T = type { i32 }")[0], ("%T", TokenKind::Type));
    assert_eq!(kinds(&def, "%0 = load i32, ptr %p")[0], ("%0", TokenKind::Variable));
    // `typed` is not `type`.
    assert_eq!(kinds(&def, "%x = typed")[0], ("%x", TokenKind::Variable));
}

#[test]
fn intrinsics_and_calls() {
    let def = llvm();
    let toks = kinds(&def, "call void @llvm.memcpy.p0.p0.i64(ptr @g)");
    assert_eq!(toks[0], ("call", TokenKind::Instruction));
    assert_eq!(toks[2], ("@llvm.memcpy.p0.p0.i64", TokenKind::Intrinsic));
    assert_eq!(toks[5], ("@g", TokenKind::GlobalVariable));
}

#[test]
fn quoted_sigil_names_use_alternate_style() {
    let def = llvm();
    assert_eq!(lex(&def, r#"@"my global""#), vec![(r#"@"my global""#, TokenKind::GlobalVariable, 1)]);
    assert_eq!(lex(&def, "#0"), vec![("#0", TokenKind::Attribute, 1)]);
    assert_eq!(lex(&def, "$c"), vec![("$c", TokenKind::Comdat, 0)]);
}

#[test]
fn metadata() {
    use TokenKind::*;
    let def = llvm();
    assert_eq!(
        kinds(&def, r#"!0 = !{!"x", i32 -1}"#),
        vec![
            ("!0", Metadata),
            ("=", Operator),
            ("!", Metadata),
            ("{", Operator),
            (r#"!"x""#, Metadata),
            (",", Operator),
            ("i32", TypeKeyword),
            ("-1", Number),
            ("}", Operator),
        ]
    );
}

#[test]
fn labels_numbers_and_comments() {
    use TokenKind::*;
    let def = llvm();
    assert_eq!(kinds(&def, "entry:"), vec![("entry:", Label)]);
    assert_eq!(
        kinds(&def, "0xK3FFF8 1.5e10 42 ; tail"),
        vec![("0xK3FFF8", Number), ("1.5e10", Number), ("42", Number), ("; tail", Comment)]
    );
    assert_eq!(kinds(&def, "x86_fp80 ..."), vec![("x86_fp80", TypeKeyword), ("...", Operator)]);
}

#[test]
fn call_form_attributes() {
    let def = llvm();
    assert_eq!(kinds(&def, "addrspace(1)")[0], ("addrspace", TokenKind::Attribute));
    assert_eq!(kinds(&def, "addrspace")[0], ("addrspace", TokenKind::Identifier));
    assert_eq!(kinds(&def, "align 4")[0], ("align", TokenKind::Attribute));
}

#[test]
fn hex_pair_escapes() {
    let text = r#"c"a\0Ab\\ \q""#;
    let out = Scanner::new(&llvm()).scan(text.as_bytes(), 0, ScanState::Normal);
    assert_eq!(out.tokens[1].kind, TokenKind::String);
    assert_eq!(out.tokens[1].span, Span::new(1, 13));
    // `\q` is not an escape in this form.
    assert_eq!(out.escapes, vec![Span::new(3, 6), Span::new(7, 9)]);
}

#[test]
fn unterminated_string_ends_at_line_end() {
    let def = llvm();
    let out = Scanner::new(&def).scan(b"\"abc\nret", 0, ScanState::Normal);
    assert_eq!(out.tokens[0].span, Span::new(0, 4));
    assert_eq!(out.tokens[0].kind, TokenKind::String);
    assert_eq!(out.tokens[2].kind, TokenKind::Instruction);
    assert_eq!(out.end_state, ScanState::Normal);
}

#[test]
fn braces_fold() {
    let def = llvm();
    assert_eq!(line_scan(&def, "define void @f() {\n", ScanState::Normal).fold.net, 1);
    assert_eq!(line_scan(&def, "}\n", ScanState::Normal).fold.net, -1);
    assert!(line_scan(&def, "  ret void\n", ScanState::Normal).fold.is_empty());
}

#[test]
fn base_offset_is_applied() {
    let mut buf = TokenBuf::new();
    Scanner::new(&llvm()).scan_line(b"ret\n", 100, ScanState::Normal, &mut buf);
    assert_eq!(buf.tokens[0].span, Span::new(100, 103));
    assert_eq!(buf.tokens[1].span, Span::new(103, 104));
}

// ─── Block Comments ─────────────────────────────────────────────────────

#[test]
fn nested_comment_on_one_line() {
    let def = c_like(true);
    assert_eq!(
        kinds(&def, "/* a /* b */ c */ x"),
        vec![("/* a /* b */ c */", TokenKind::Comment), ("x", TokenKind::Identifier)]
    );
}

#[test]
fn nested_depth_carries_across_lines() {
    let def = c_like(true);
    let out = Scanner::new(&def).scan(b"/* a /* b", 0, ScanState::Normal);
    assert_eq!(out.end_state, ScanState::BlockComment { depth: 2 });

    let out = Scanner::new(&def).scan(b"/* a /* b\n*/ still\n*/ x", 0, ScanState::Normal);
    assert_eq!(out.end_state, ScanState::Normal);
    let comments = out.tokens.iter().filter(|t| t.kind == TokenKind::Comment).count();
    assert_eq!(comments, 3);
    assert_eq!(out.tokens.last().unwrap().kind, TokenKind::Identifier);
}

#[test]
fn flat_comments_end_at_first_closer() {
    let def = c_like(false);
    assert_eq!(
        kinds(&def, "/* a /* b */ c"),
        vec![("/* a /* b */", TokenKind::Comment), ("c", TokenKind::Identifier)]
    );
}

#[test]
fn stray_closer_is_a_comment_token() {
    let def = c_like(true);
    assert_eq!(
        kinds(&def, "*/ x"),
        vec![("*/", TokenKind::Comment), ("x", TokenKind::Identifier)]
    );
}

#[test]
fn comment_fold_counts_outermost_only() {
    let def = c_like(true);
    let first = line_scan(&def, "/* a /* b\n", ScanState::Normal);
    assert_eq!(first.fold.net, 1);
    let middle = line_scan(&def, "*/ more\n", first.exit);
    assert!(middle.fold.is_empty());
    let last = line_scan(&def, "*/\n", middle.exit);
    assert_eq!(last.fold.net, -1);
    assert_eq!(last.exit, ScanState::Normal);
}

#[test]
fn resumed_comment_on_empty_line_emits_only_terminator() {
    let def = c_like(true);
    let mut buf = TokenBuf::new();
    let entry = ScanState::BlockComment { depth: 1 };
    let scan = Scanner::new(&def).scan_line(b"\n", 0, entry, &mut buf);
    assert_eq!(scan.exit, entry);
    assert_eq!(buf.tokens.len(), 1);
    assert_eq!(buf.tokens[0].kind, TokenKind::Default);
}

// ─── Strings and Operators ──────────────────────────────────────────────

#[test]
fn multiline_string_continues() {
    let def = c_like(true);
    let out = Scanner::new(&def).scan(b"\"abc\ndef\" x", 0, ScanState::Normal);
    let strings: Vec<_> = out
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::String)
        .map(|t| t.span)
        .collect();
    assert_eq!(strings, vec![Span::new(0, 4), Span::new(5, 9)]);
    assert_eq!(out.end_state, ScanState::Normal);

    let open = Scanner::new(&def).scan(b"\"abc", 0, ScanState::Normal);
    assert_eq!(open.end_state, ScanState::String { quote: b'"' });
}

#[test]
fn single_char_escapes_keep_string_whole() {
    let def = c_like(true);
    let text = r#""a\"b" c"#;
    let out = Scanner::new(&def).scan(text.as_bytes(), 0, ScanState::Normal);
    assert_eq!(out.tokens[0].span, Span::new(0, 6));
    assert_eq!(out.escapes, vec![Span::new(2, 4)]);
}

#[test]
fn longest_operator_wins() {
    let def = c_like(true);
    assert_eq!(
        kinds(&def, "a <<= b << c < d"),
        vec![
            ("a", TokenKind::Identifier),
            ("<<=", TokenKind::Operator),
            ("b", TokenKind::Identifier),
            ("<<", TokenKind::Operator),
            ("c", TokenKind::Identifier),
            ("<", TokenKind::Operator),
            ("d", TokenKind::Identifier),
        ]
    );
}

#[test]
fn non_ascii_is_one_default_token_per_char() {
    let def = c_like(true);
    assert_eq!(lex(&def, "é"), vec![("é", TokenKind::Default, 0)]);
}

#[test]
fn every_terminator_is_its_own_token() {
    let def = c_like(true);
    let toks = lex(&def, "a\r\nb\rc\n");
    let terminators: Vec<_> = toks.iter().filter(|(s, ..)| s.contains(['\r', '\n'])).map(|t| t.0).collect();
    assert_eq!(terminators, vec!["\r\n", "\r", "\n"]);
}

#[test]
fn empty_buffer_has_no_tokens() {
    let out = Scanner::new(&llvm()).scan(b"", 0, ScanState::Normal);
    assert!(out.tokens.is_empty());
    assert_eq!(out.end_state, ScanState::Normal);
}

// ─── Properties ─────────────────────────────────────────────────────────

const ALPHABET: &str = r#"[a-z0-9 {}()/*"\\;@%!#=<\n\r\té-]{0,80}"#;

proptest! {
    #[test]
    fn tokens_tile_the_buffer(text in ALPHABET, nested in any::<bool>()) {
        for def in [llvm(), c_like(nested)] {
            let out = Scanner::new(&def).scan(text.as_bytes(), 0, ScanState::Normal);
            assert_tiles(&text, &out.tokens);
            for token in &out.tokens {
                let s = &text[token.span.to_range()];
                let has_break = s.contains(['\r', '\n']);
                prop_assert!(!has_break || matches!(s, "\n" | "\r" | "\r\n"), "token crosses a line: {:?}", s);
            }
        }
    }

    #[test]
    fn scanning_is_deterministic(text in ALPHABET) {
        let def = c_like(true);
        let a = Scanner::new(&def).scan(text.as_bytes(), 0, ScanState::Normal);
        let b = Scanner::new(&def).scan(text.as_bytes(), 0, ScanState::Normal);
        prop_assert_eq!(a, b);
    }

    /// Splitting at any line start and resuming from the carried state
    /// reproduces a single full scan.
    #[test]
    fn resume_at_line_boundary(text in ALPHABET, pick in any::<prop::sample::Index>()) {
        let def = c_like(true);
        let scanner = Scanner::new(&def);
        let bytes = text.as_bytes();
        let starts: Vec<usize> = Lines::new(bytes).map(|l| l.start).collect();
        let split = starts[pick.index(starts.len())];

        let whole = scanner.scan(bytes, 0, ScanState::Normal);
        let head = scanner.scan(&bytes[..split], 0, ScanState::Normal);
        let tail = scanner.scan(&bytes[split..], offset(split), head.end_state);

        let mut joined = head.tokens;
        joined.extend(tail.tokens);
        prop_assert_eq!(joined, whole.tokens);
        prop_assert_eq!(tail.end_state, whole.end_state);
    }
}
