//! Line access over a dialogue document
//!
//! Lines are split the way an editor buffer splits them: `\n`, `\r\n` and a
//! lone `\r` each end a line, and text ending in a terminator has one more,
//! empty, line after it. An empty document therefore still has one line.

use ropey::Rope;
use std::borrow::Cow;

/// Immutable snapshot of a document's text
pub struct Document {
    rope: Rope,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Number of lines, always at least one
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Index of the last line
    pub fn last_line(&self) -> usize {
        self.line_count() - 1
    }

    /// Text of a line without its terminator
    pub fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        if index >= self.line_count() {
            return None;
        }

        let text: Cow<'_, str> = self.rope.line(index).into();
        Some(match text {
            Cow::Borrowed(s) => Cow::Borrowed(strip_terminator(s)),
            Cow::Owned(s) => Cow::Owned(strip_terminator(&s).to_string()),
        })
    }

    /// Character length of a line, terminator excluded
    pub fn line_len(&self, index: usize) -> usize {
        self.line(index).map(|l| l.chars().count()).unwrap_or(0)
    }

    /// Iterate over all lines in order
    pub fn lines(&self) -> impl Iterator<Item = Cow<'_, str>> + '_ {
        (0..self.line_count()).filter_map(move |i| self.line(i))
    }
}

fn strip_terminator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}

/// Convert a character offset within a line to a byte offset, clamped to the line end
pub(crate) fn char_to_byte(line: &str, character: usize) -> usize {
    line.char_indices()
        .nth(character)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}

/// Convert a byte offset within a line to a character offset
pub(crate) fn byte_to_char(line: &str, byte: usize) -> usize {
    line[..byte].chars().count()
}
