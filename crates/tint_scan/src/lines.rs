//! Line splitting.
//!
//! A line ends at `\n`, `\r\n`, or a lone `\r`; the terminator belongs to
//! the line it ends. A buffer always has one more line than it has
//! terminators, so the empty buffer is one empty line and a trailing
//! terminator is followed by an empty last line.

use std::ops::Range;

use memchr::memchr2;

/// Byte bounds of one line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LineBounds {
    pub start: usize,
    /// End of the content, where the terminator (if any) begins.
    pub content_end: usize,
    /// End of the line including its terminator.
    pub end: usize,
}

impl LineBounds {
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    #[inline]
    pub fn content(&self) -> Range<usize> {
        self.start..self.content_end
    }

    #[inline]
    pub fn has_terminator(&self) -> bool {
        self.end > self.content_end
    }
}

/// Bounds of the line starting at `start`.
pub fn line_at(text: &[u8], start: usize) -> LineBounds {
    match memchr2(b'\n', b'\r', &text[start..]) {
        Some(offset) => {
            let content_end = start + offset;
            let end = if text[content_end] == b'\r' && text.get(content_end + 1) == Some(&b'\n') {
                content_end + 2
            } else {
                content_end + 1
            };
            LineBounds {
                start,
                content_end,
                end,
            }
        }
        None => LineBounds {
            start,
            content_end: text.len(),
            end: text.len(),
        },
    }
}

/// Length of the terminator at the end of a single line's bytes.
pub fn terminator_len(line: &[u8]) -> usize {
    match line {
        [.., b'\r', b'\n'] => 2,
        [.., b'\n' | b'\r'] => 1,
        _ => 0,
    }
}

/// Iterator over the lines of a buffer. Always yields at least one line.
#[derive(Clone, Debug)]
pub struct Lines<'a> {
    text: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> Lines<'a> {
    pub fn new(text: &'a [u8]) -> Self {
        Lines {
            text,
            pos: 0,
            done: false,
        }
    }

    /// Iterate from `start`, which must be a line start.
    pub fn starting_at(text: &'a [u8], start: usize) -> Self {
        Lines {
            text,
            pos: start,
            done: false,
        }
    }
}

impl Iterator for Lines<'_> {
    type Item = LineBounds;

    fn next(&mut self) -> Option<LineBounds> {
        if self.done {
            return None;
        }
        let bounds = line_at(self.text, self.pos);
        if !bounds.has_terminator() {
            self.done = true;
        }
        self.pos = bounds.end;
        Some(bounds)
    }
}

/// Number of lines in `text`.
pub fn line_count(text: &[u8]) -> usize {
    Lines::new(text).count()
}
