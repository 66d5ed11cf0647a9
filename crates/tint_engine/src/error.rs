//! Errors for buffer edits.

use thiserror::Error;
use tint_scan::Span;

/// Why a [`Document`](crate::Document) edit was refused. The document is
/// left unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("offset {offset} is past the end of the buffer ({len} bytes)")]
    OutOfBounds { offset: usize, len: usize },
    #[error("range {start}..{end} is inverted")]
    Inverted { start: usize, end: usize },
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
    #[error("edits overlap: {first:?} and {second:?}")]
    Overlap { first: Span, second: Span },
    #[error("buffer of {len} bytes exceeds the 4 GiB limit")]
    TooLarge { len: usize },
}

/// Offsets are `u32`, so a buffer must stay below 4 GiB.
pub(crate) fn check_size(len: usize) -> Result<(), EditError> {
    if u32::try_from(len).is_ok() {
        Ok(())
    } else {
        Err(EditError::TooLarge { len })
    }
}
