#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::testing::{c_like, full, llvm};
use pretty_assertions::assert_eq;
use tint_lang::TokenKind;

fn replaced(text: &str, range: std::ops::Range<usize>, with: &str) -> (String, Edit) {
    let mut out = text.to_owned();
    out.replace_range(range.clone(), with);
    (out, Edit::replace(Span::from_range(range), offset(with.len())))
}

#[test]
fn edit_matches_full_scan_and_reports_change() {
    let def = llvm();
    let text = "define void @f() {\n  ret void\n}\n";
    let mut engine = Engine::new(Arc::clone(&def), text).unwrap();
    let (after, edit) = replaced(text, 21..29, "ret i32 0");

    let change = engine.edit(&after, edit);
    assert_eq!(engine.highlights().stream(), &full(&def, &after));
    assert_eq!(change.outcome, Outcome::Converged);
    assert_eq!(change.lines, 1..2);
    assert_eq!(change.bytes, Span::new(19, 31));
    assert_eq!(change.line_delta, 0);
    assert_eq!(engine.highlights().revision(), 1);
}

#[test]
fn line_delta_counts_new_lines() {
    let text = "a\nb";
    let mut engine = Engine::new(llvm(), text).unwrap();
    let (after, edit) = replaced(text, 1..1, "\nx\ny");
    assert_eq!(engine.edit(&after, edit).line_delta, 2);
    let (again, edit) = replaced(&after, 0..after.len(), "");
    assert_eq!(engine.edit(&again, edit).line_delta, -3);
}

#[test]
fn snapshots_are_isolated_from_later_edits() {
    let text = "ret void";
    let mut engine = Engine::new(llvm(), text).unwrap();
    let before = engine.snapshot();
    let (after, edit) = replaced(text, 0..0, "; ");
    engine.edit(&after, edit);

    assert_eq!(before.token_at(0).unwrap().kind, TokenKind::Instruction);
    assert_eq!(engine.highlights().token_at(0).unwrap().kind, TokenKind::Comment);
    assert_eq!(before.revision(), 0);
}

#[test]
fn deferred_edits_flush_once() {
    let def = c_like();
    let mut engine = Engine::new(Arc::clone(&def), "x = 1;\n").unwrap();
    assert!(engine.flush("x = 1;\n").is_none());

    // Type "ab" then delete the "a".
    engine.defer_edit(Edit::insert(0, 1));
    engine.defer_edit(Edit::insert(1, 1));
    engine.defer_edit(Edit::delete(Span::new(0, 1)));
    assert!(engine.has_pending());

    let text = "bx = 1;\n";
    let change = engine.flush(text).unwrap();
    assert!(!engine.has_pending());
    assert_eq!(change.stats.scanned_lines, 1);
    assert_eq!(engine.highlights().stream(), &full(&def, text));
    assert_eq!(engine.highlights().revision(), 1);
}

#[test]
fn edit_folds_in_pending_edits() {
    let def = c_like();
    let mut engine = Engine::new(Arc::clone(&def), "a\nb\n").unwrap();
    engine.defer_edit(Edit::insert(0, 2));
    let change = engine.edit("/*xa\nb\n", Edit::insert(2, 1));
    assert!(!engine.has_pending());
    assert_eq!(change.outcome, Outcome::EndOfBuffer);
    assert_eq!(engine.highlights().stream(), &full(&def, "/*xa\nb\n"));
}

#[test]
fn mismatched_edit_falls_back_to_rescan() {
    let def = llvm();
    let mut engine = Engine::new(Arc::clone(&def), "ret void").unwrap();
    let change = engine.edit("ret i32 0", Edit::insert(0, 5));
    assert_eq!(change.outcome, Outcome::FullRescan);
    assert_eq!(engine.highlights().stream(), &full(&def, "ret i32 0"));
}

#[test]
fn capped_relex_marks_stale_until_resumed() {
    let def = c_like();
    let before = "x\n".repeat(40);
    let config = EngineConfig::default().with_max_relex_bytes(8);
    let mut engine = Engine::with_config(Arc::clone(&def), &before, config).unwrap();
    let (after, edit) = replaced(&before, 0..0, "/*");

    let change = engine.edit(&after, edit);
    assert_eq!(change.outcome, Outcome::Capped);
    assert!(engine.is_stale());
    let stale = engine.highlights().stale_from().unwrap();
    assert_eq!(stale, change.lines.end);

    let h = engine.highlights();
    let last = h.line_span(h.line_count() - 2).unwrap();
    assert!(h.is_stale_line(stale));
    assert!(!h.is_stale_line(stale - 1));
    assert!(h.style_at(last.start).is_none());
    assert!(h.segments(last).iter().all(|s| s.stale));
    assert!(h.segments(h.line_span(0).unwrap()).iter().all(|s| !s.stale));

    while engine.is_stale() {
        engine.resume(&after, Some(8)).unwrap();
    }
    assert!(engine.resume(&after, None).is_none());
    assert_eq!(engine.highlights().stream(), &full(&def, &after));
    assert_eq!(
        engine.highlights().folds(),
        &crate::fold::FoldTable::compute(full(&def, &after).lines())
    );
}

#[test]
fn edit_before_stale_line_keeps_it_stale() {
    let def = c_like();
    let before = "x\n".repeat(40);
    let config = EngineConfig::default().with_max_relex_bytes(8);
    let mut engine = Engine::with_config(Arc::clone(&def), &before, config).unwrap();
    let (mid, edit) = replaced(&before, 20..20, "/*");
    engine.edit(&mid, edit);
    let stale = engine.highlights().stale_from().unwrap();

    // A same-line edit well before the stale line converges immediately.
    let (after, edit) = replaced(&mid, 0..1, "yy");
    let change = engine.edit(&after, edit);
    assert_eq!(change.outcome, Outcome::Converged);
    assert_eq!(engine.highlights().stale_from(), Some(stale));

    engine.set_config(EngineConfig::default());
    engine.resume(&after, None).unwrap();
    assert!(!engine.is_stale());
    assert_eq!(engine.highlights().stream(), &full(&def, &after));
}

#[test]
fn edit_inside_stale_line_scans_from_predecessor_exit() {
    let def = c_like();
    let before = "xx\nxx\nxx\nxx\n";
    let config = EngineConfig::default().with_max_relex_bytes(0);
    let mut engine = Engine::with_config(Arc::clone(&def), before, config).unwrap();
    let (mid, edit) = replaced(before, 0..0, "/*");
    engine.edit(&mid, edit);
    assert_eq!(engine.highlights().stale_from(), Some(1));

    let (after, edit) = replaced(&mid, 6..7, "y");
    let change = engine.edit(&after, edit);
    assert_eq!(change.outcome, Outcome::Capped);

    let fresh = full(&def, &after);
    let h = engine.highlights();
    assert_eq!(h.line_tokens(1), fresh.line_tokens(1));
    assert_eq!(h.kind_at(5).map(|(kind, _)| kind), Some(TokenKind::Comment));
    assert_eq!(h.stale_from(), Some(2));

    while engine.is_stale() {
        engine.resume(&after, Some(0)).unwrap();
    }
    assert_eq!(engine.highlights().stream(), &fresh);
}

#[test]
fn convergence_at_stale_line_clears_it() {
    let def = c_like();
    let before = "xx\nxx\nxx\n";
    let config = EngineConfig::default().with_max_relex_bytes(0);
    let mut engine = Engine::with_config(Arc::clone(&def), before, config).unwrap();
    let (mid, edit) = replaced(before, 0..0, "/*");
    engine.edit(&mid, edit);
    assert_eq!(engine.highlights().stale_from(), Some(1));

    // Removing the opener brings line 1 back to its recorded entry state.
    let (after, edit) = replaced(&mid, 0..2, "");
    let change = engine.edit(&after, edit);
    assert_eq!(change.outcome, Outcome::Converged);
    assert_eq!(engine.highlights().stale_from(), None);
    assert_eq!(engine.highlights().stream(), &full(&def, &after));
    assert!(engine.resume(&after, None).is_none());
}

#[test]
fn rescan_discards_pending() {
    let def = llvm();
    let mut engine = Engine::new(Arc::clone(&def), "ret void").unwrap();
    engine.defer_edit(Edit::insert(0, 1));
    let change = engine.rescan("ret i32 0\n");
    assert!(!engine.has_pending());
    assert_eq!(change.outcome, Outcome::FullRescan);
    assert_eq!(change.lines, 0..2);
    assert_eq!(change.stats.scanned_bytes, 10);
}

#[test]
fn shared_highlights_publish_to_readers() {
    let def = llvm();
    let text = "ret void";
    let mut engine = Engine::new(def, text).unwrap();
    let shared = Arc::new(SharedHighlights::new(engine.snapshot()));

    let (after, edit) = replaced(text, 0..0, "; ");
    engine.edit(&after, edit);
    let reader = Arc::clone(&shared);
    let seen = std::thread::spawn(move || reader.load().revision()).join().unwrap();
    assert_eq!(seen, 0);

    engine.publish(&shared);
    let reader = Arc::clone(&shared);
    let seen = std::thread::spawn(move || reader.load().token_at(0).map(|t| t.kind))
        .join()
        .unwrap();
    assert_eq!(seen, Some(TokenKind::Comment));
}

#[test]
fn buffers_must_fit_u32_offsets() {
    let limit = u32::MAX as usize;
    assert_eq!(check_size(limit), Ok(()));
    assert_eq!(check_size(limit + 1), Err(EditError::TooLarge { len: limit + 1 }));
    assert!(Engine::new(llvm(), "").is_ok());
}
