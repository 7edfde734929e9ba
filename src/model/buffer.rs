//! Text buffer - the one character store both projections read from
//!
//! Lines are split on CR, LF and CRLF. A line may end with [`PARAGRAPH_END`],
//! which marks a deliberate paragraph break rather than a soft wrap into the
//! next line. The sentinel lives in the buffer like any other character; the
//! file formats strip it or translate it to their own marker.

use ropey::{Rope, RopeSlice};
use std::ops::Range;

/// In-memory paragraph-end sentinel (zero width no-break space)
pub const PARAGRAPH_END: char = '\u{feff}';

/// A single textual mutation and everything needed to invert it.
///
/// At `start_offset`, `inserted_length` characters now stand where
/// `replaced_text` used to be. Applying
/// `replace_range(start_offset, inserted_length, replaced_text)` undoes the
/// edit and yields the record of the edit it undid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRecord {
    /// Character offset where the edit happened
    pub start_offset: usize,
    /// Number of characters inserted by the edit
    pub inserted_length: usize,
    /// Characters removed by the edit
    pub replaced_text: String,
}

impl EditRecord {
    /// Character range currently occupied by the inserted text
    pub fn inserted_range(&self) -> Range<usize> {
        self.start_offset..self.start_offset + self.inserted_length
    }

    /// Signed change in document length caused by this edit
    pub fn length_delta(&self) -> isize {
        self.inserted_length as isize - self.replaced_text.chars().count() as isize
    }
}

/// Rope-backed document content with a line index.
///
/// All offsets are character offsets. Offsets past the end of the buffer are
/// contract violations and panic.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a buffer holding `text`
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Number of lines (always >= 1, a trailing terminator opens an empty line)
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total number of characters
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Text of line `index` without its terminator, sentinel included
    pub fn line(&self, index: usize) -> String {
        self.line_slice(index).to_string()
    }

    /// Like [`TextBuffer::line`] but without allocating
    pub fn line_slice(&self, index: usize) -> RopeSlice<'_> {
        assert!(
            index < self.line_count(),
            "line index {} out of range (line count {})",
            index,
            self.line_count()
        );
        let line = self.rope.line(index);
        let len = line.len_chars();
        line.slice(..len - terminator_len(line))
    }

    /// Length of line `index` in characters, terminator excluded
    pub fn line_length(&self, index: usize) -> usize {
        self.line_slice(index).len_chars()
    }

    /// Whether line `index` ends with the paragraph-end sentinel
    pub fn has_paragraph_end(&self, index: usize) -> bool {
        let line = self.line_slice(index);
        let len = line.len_chars();
        len > 0 && line.char(len - 1) == PARAGRAPH_END
    }

    /// Number of characters in the terminator that ends line `index`
    /// (0 for the last line)
    pub fn terminator_length(&self, index: usize) -> usize {
        assert!(
            index < self.line_count(),
            "line index {} out of range (line count {})",
            index,
            self.line_count()
        );
        terminator_len(self.rope.line(index))
    }

    /// Character offset of the first character of line `index`
    pub fn offset_at_line(&self, index: usize) -> usize {
        assert!(
            index < self.line_count(),
            "line index {} out of range (line count {})",
            index,
            self.line_count()
        );
        self.rope.line_to_char(index)
    }

    /// Line containing character offset `offset` (`offset == char_count()`
    /// resolves to the last line)
    pub fn line_at_offset(&self, offset: usize) -> usize {
        assert!(
            offset <= self.char_count(),
            "offset {} out of range (char count {})",
            offset,
            self.char_count()
        );
        self.rope.char_to_line(offset)
    }

    /// Characters in `range` as a String
    pub fn slice(&self, range: Range<usize>) -> String {
        self.rope.slice(range).to_string()
    }

    /// Whole content as a String
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Iterate over line texts (terminators excluded)
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.line_count()).map(move |i| self.line(i))
    }

    /// Replace `length` characters at `start` with `text`.
    ///
    /// Returns the record describing the edit, which is also its own inverse
    /// description. Callers that need history or redraw must route the record
    /// onwards; the buffer itself keeps none.
    pub fn replace_range(&mut self, start: usize, length: usize, text: &str) -> EditRecord {
        let end = start
            .checked_add(length)
            .unwrap_or_else(|| panic!("edit range {}+{} overflows", start, length));
        assert!(
            end <= self.char_count(),
            "edit range {}..{} out of range (char count {})",
            start,
            end,
            self.char_count()
        );

        let replaced_text = self.rope.slice(start..end).to_string();
        if length > 0 {
            self.rope.remove(start..end);
        }
        if !text.is_empty() {
            self.rope.insert(start, text);
        }

        EditRecord {
            start_offset: start,
            inserted_length: text.chars().count(),
            replaced_text,
        }
    }

    /// Replace the whole content, returning nothing: wholesale replacement is
    /// never recorded as an edit
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }
}

/// Length of the CR, LF or CRLF ending a rope line
fn terminator_len(line: RopeSlice<'_>) -> usize {
    let len = line.len_chars();
    if len == 0 {
        return 0;
    }
    match line.char(len - 1) {
        '\n' if len > 1 && line.char(len - 2) == '\r' => 2,
        '\n' | '\r' => 1,
        _ => 0,
    }
}
