#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::fold::FoldTable;
use crate::relex::Outcome;
use crate::testing::{c_like, full, llvm};
use pretty_assertions::assert_eq;

fn assert_fresh(doc: &Document) {
    let def = doc.engine().definition();
    let expected = full(def, doc.text());
    assert_eq!(doc.highlights().stream(), &expected);
    assert_eq!(doc.highlights().folds(), &FoldTable::compute(expected.lines()));
    assert!(doc.highlights().stale_from().is_none());
}

#[test]
fn insert_delete_replace_track_full_scan() {
    let mut doc = Document::new(llvm(), "define void @f() {\n  ret void\n}\n").unwrap();

    doc.insert(0, "; header\n").unwrap();
    assert_fresh(&doc);
    assert_eq!(doc.highlights().fold_level(1).map(|f| f.header), Some(true));

    doc.replace(30..38, "ret i32 0").unwrap();
    assert_eq!(doc.text(), "; header\ndefine void @f() {\n  ret i32 0\n}\n");
    assert_fresh(&doc);

    doc.delete(0..9).unwrap();
    assert_fresh(&doc);
    assert_eq!(doc.highlights().fold_level(0).map(|f| f.header), Some(true));
}

#[test]
fn unterminated_comment_reaches_end_then_heals() {
    let mut doc = Document::new(c_like(), "a = 1;\n{\nb = 2;\n}\n").unwrap();

    let change = doc.insert(0, "/* ").unwrap();
    assert_eq!(change.outcome, Outcome::EndOfBuffer);
    assert_eq!(doc.highlights().fold_level(1).map(|f| f.header), Some(false));
    assert_fresh(&doc);

    let change = doc.insert(6, " */").unwrap();
    assert_eq!(change.outcome, Outcome::EndOfBuffer);
    assert_eq!(doc.highlights().fold_level(1).map(|f| f.header), Some(true));
    assert_fresh(&doc);
}

#[test]
fn errors_leave_document_unchanged() {
    let mut doc = Document::new(c_like(), "é = 1;\n").unwrap();
    let before = doc.snapshot();

    assert_eq!(
        doc.insert(99, "x").unwrap_err(),
        EditError::OutOfBounds { offset: 99, len: 8 }
    );
    #[allow(clippy::reversed_empty_ranges, reason = "exercising inverted input")]
    let inverted = 3..1;
    assert_eq!(
        doc.replace(inverted, "x").unwrap_err(),
        EditError::Inverted { start: 3, end: 1 }
    );
    assert_eq!(
        doc.delete(1..3).unwrap_err(),
        EditError::NotCharBoundary { offset: 1 }
    );
    assert_eq!(
        doc.apply([
            TextEdit::replace(Span::new(2, 5), "y"),
            TextEdit::insert(4, "z"),
        ])
        .unwrap_err(),
        EditError::Overlap {
            first: Span::new(2, 5),
            second: Span::new(4, 4),
        }
    );

    assert_eq!(doc.text(), "é = 1;\n");
    assert_eq!(doc.highlights().revision(), before.revision());
    assert!(!doc.engine().has_pending());
}

#[test]
fn batch_applies_in_one_relex() {
    let mut doc = Document::new(c_like(), "a = 1;\nb = 2;\nc = 3;\n").unwrap();
    let change = doc
        .apply([
            TextEdit::replace(Span::new(0, 1), "if"),
            TextEdit::insert(14, "// tail\n"),
            TextEdit::delete(Span::new(7, 8)),
        ])
        .unwrap()
        .unwrap();

    assert_eq!(doc.text(), "if = 1;\n = 2;\n// tail\nc = 3;\n");
    assert_eq!(doc.highlights().revision(), 1);
    assert_eq!(change.line_delta, 1);
    assert_fresh(&doc);
}

#[test]
fn batch_inserts_at_one_offset_keep_order() {
    let mut doc = Document::new(c_like(), "x").unwrap();
    doc.apply([
        TextEdit::insert(0, "a"),
        TextEdit::insert(0, "b"),
        TextEdit::replace(Span::new(0, 1), "y"),
    ])
    .unwrap();
    assert_eq!(doc.text(), "aby");
    assert_fresh(&doc);
}

#[test]
fn empty_batch_is_a_no_op() {
    let mut doc = Document::new(c_like(), "x").unwrap();
    assert_eq!(doc.apply([]).unwrap(), None);
    assert_eq!(doc.highlights().revision(), 0);
}

#[test]
fn budget_applies_through_document() {
    let text = "x\n".repeat(50);
    let config = EngineConfig::default().with_max_relex_bytes(4);
    let mut doc = Document::with_config(c_like(), text, config).unwrap();

    assert_eq!(doc.insert(0, "/*").unwrap().outcome, Outcome::Capped);
    assert!(doc.engine().is_stale());
    while doc.resume(Some(16)).is_some() {}
    assert_fresh(&doc);

    doc.rescan();
    assert_fresh(&doc);
}
