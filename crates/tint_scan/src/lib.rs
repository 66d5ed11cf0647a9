//! Line scanner for the Tint lexing engine.
//!
//! Turns text into classified tokens using nothing but a
//! [`LanguageDefinition`](tint_lang::LanguageDefinition). The scanner is
//! line-oriented: each line is scanned from the state the previous line
//! left behind, which is what lets an incremental re-lexer restart at any
//! line boundary and stop as soon as states agree again.
//!
//! ```
//! use tint_scan::{ScanState, Scanner};
//! use tint_lang::TokenKind;
//!
//! let def = tint_lang::languages::llvm().map_err(|e| e.to_string())?;
//! let out = Scanner::new(&def).scan(b"ret i32 0 ; done", 0, ScanState::Normal);
//! assert_eq!(out.tokens[0].kind, TokenKind::Instruction);
//! assert_eq!(out.tokens.last().map(|t| t.kind), Some(TokenKind::Comment));
//! # Ok::<(), String>(())
//! ```

mod cursor;
mod lines;
mod scanner;
mod token;

pub use cursor::Cursor;
pub use lines::{line_at, line_count, terminator_len, LineBounds, Lines};
pub use scanner::{LineScan, ScanOutput, Scanner, TokenBuf};
pub use token::{offset, shift, FoldDelta, ScanState, Span, Token};
