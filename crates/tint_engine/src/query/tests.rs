#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::testing::{c_like, llvm};
use pretty_assertions::assert_eq;

fn scan(def: std::sync::Arc<tint_lang::LanguageDefinition>, text: &str) -> Highlights {
    Highlights::scan(def, text.as_bytes())
}

fn seg(start: u32, end: u32, kind: TokenKind) -> Segment {
    Segment {
        span: Span::new(start, end),
        kind,
        sub: SubStyle::BASE,
        stale: false,
    }
}

#[test]
fn token_at_and_line_of() {
    let h = scan(llvm(), "ret void\nret i32 0");
    assert_eq!(h.token_at(0).unwrap().kind, TokenKind::Instruction);
    assert_eq!(h.token_at(4).unwrap().span, Span::new(4, 8));
    assert_eq!(h.token_at(8).unwrap().kind, TokenKind::Default);
    assert!(h.token_at(18).is_none());
    assert_eq!(h.line_of(9), 1);
    assert_eq!(h.line_span(1), Some(Span::new(9, 18)));
    assert_eq!(h.line_count(), 2);
    assert_eq!(h.len(), 18);
}

#[test]
fn tokens_in_touching_range() {
    let h = scan(llvm(), "ret void");
    let spans: Vec<_> = h.tokens_in(Span::new(2, 5)).iter().map(|t| t.span).collect();
    assert_eq!(spans, vec![Span::new(0, 3), Span::new(3, 4), Span::new(4, 8)]);
    assert!(h.tokens_in(Span::new(3, 3)).is_empty());
    assert_eq!(h.tokens_in(Span::new(0, 100)).len(), 3);
}

#[test]
fn segments_overlay_escapes() {
    let h = scan(c_like(), r#"s = "a\nb";"#);
    assert_eq!(
        h.segments(Span::new(0, 11)).to_vec(),
        vec![
            seg(0, 1, TokenKind::Identifier),
            seg(1, 2, TokenKind::Default),
            seg(2, 3, TokenKind::Operator),
            seg(3, 4, TokenKind::Default),
            seg(4, 6, TokenKind::String),
            seg(6, 8, TokenKind::Escape),
            seg(8, 10, TokenKind::String),
            seg(10, 11, TokenKind::Operator),
        ]
    );
}

#[test]
fn segments_are_clipped() {
    let h = scan(c_like(), r#"s = "a\nb";"#);
    assert_eq!(
        h.segments(Span::new(5, 7)).to_vec(),
        vec![seg(5, 6, TokenKind::String), seg(6, 7, TokenKind::Escape)]
    );
    assert!(h.segments(Span::new(5, 5)).is_empty());
}

#[test]
fn sub_styles_reach_segments() {
    let h = scan(llvm(), r#"%"q" = "#);
    let first = h.segments(Span::new(0, 4))[0];
    assert_eq!(first.kind, TokenKind::Variable);
    assert_eq!(first.sub, SubStyle::ALT);
}

#[test]
fn styles_resolve_through_the_definition() {
    let h = scan(c_like(), r#"s = "a\nb"; // c"#);
    assert_eq!(h.kind_at(6), Some((TokenKind::Escape, SubStyle::BASE)));
    assert_eq!(h.style_at(6).unwrap().attributes.as_str(), "fore:#0080C0");
    assert_eq!(&*h.style_at(5).unwrap().name, "String");
    assert_eq!(h.style_at(13).unwrap().kind, TokenKind::Comment);
    // No rule for identifiers in this definition.
    assert!(h.style_at(0).is_none());
    assert!(h.style_at(100).is_none());
    assert_eq!(h.style_of(TokenKind::String).unwrap().attributes.as_str(), "fore:#008000");
}

#[test]
fn llvm_styles_pass_attributes_through() {
    let h = scan(llvm(), "call void @llvm.trap()");
    let at = |offset| h.style_at(offset).unwrap().attributes.as_str().to_owned();
    assert_eq!(at(0), "fore:#0080FF");
    assert_eq!(at(5), "fore:#0000FF");
    assert_eq!(at(10), "bold; fore:#A46000");
}

#[test]
fn fold_queries() {
    let h = scan(llvm(), "define void @f() {\n  ret void\n}\n");
    assert!(h.is_fold_header(0));
    assert!(!h.is_fold_header(1));
    assert_eq!(h.fold_level(1).unwrap().level, 1);
    assert_eq!(h.fold_end(0), Some(2));
    assert!(h.fold_level(10).is_none());
}
