//! Incremental lexing engine.
//!
//! Keeps a token stream, fold levels and style lookups consistent with a
//! text buffer as it is edited. After each edit only the lines from the
//! edit up to the point where the scanner state converges with the previous
//! pass are re-scanned.
//!
//! ```
//! use tint_engine::Document;
//! use tint_lang::TokenKind;
//!
//! let def = tint_lang::languages::llvm().map_err(|e| e.to_string())?;
//! let mut doc = Document::new(def, "define void @f() {\n  ret void\n}\n").map_err(|e| e.to_string())?;
//! assert!(doc.highlights().is_fold_header(0));
//!
//! doc.insert(0, "; entry point\n").map_err(|e| e.to_string())?;
//! assert_eq!(doc.highlights().line_tokens(0)[0].kind, TokenKind::Comment);
//! assert!(doc.highlights().is_fold_header(1));
//! # Ok::<(), String>(())
//! ```

mod config;
mod document;
mod edit;
mod engine;
mod error;
mod fold;
mod highlights;
mod query;
mod relex;
mod stream;

#[cfg(test)]
mod testing;

pub use config::EngineConfig;
pub use document::Document;
pub use edit::{Edit, TextEdit};
pub use engine::{Change, Engine};
pub use error::EditError;
pub use fold::{FoldLevel, FoldTable};
pub use highlights::{Highlights, SharedHighlights};
pub use query::{Segment, Segments};
pub use relex::{Outcome, RelexStats};
pub use stream::{LineEntry, TokenStream};

pub use tint_scan::{ScanState, Span, Token};
