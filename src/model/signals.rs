//! Margin signals - the edge-triggered "bells" of a braille typewriter
//!
//! The signaler watches caret positions and reports when the caret steps
//! onto the line margin, onto the end of the line, or (on Enter) towards the
//! bottom of the page. It knows nothing about audio; whoever plays the cue
//! consumes the returned [`MarginSignal`].

use super::buffer::TextBuffer;
use super::layout::Layout;

/// A cue produced by caret motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarginSignal {
    /// The caret stepped onto the line margin column
    LineMargin,
    /// The caret stepped onto the last column of the line
    LineEnd,
    /// A confirmed line put the caret near the bottom of the page
    PageMargin,
}

/// Which bells are enabled and where they ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginBells {
    /// Column of the line margin bell, `None` disables it
    pub line_margin: Option<usize>,
    /// Page line of the page margin bell, `None` disables it
    pub page_margin: Option<usize>,
    /// Whether reaching `chars_per_line` rings
    pub line_end: bool,
}

impl Default for MarginBells {
    fn default() -> Self {
        Self {
            line_margin: Some(33),
            page_margin: Some(25),
            line_end: true,
        }
    }
}

impl MarginBells {
    /// All bells off
    pub fn silent() -> Self {
        Self {
            line_margin: None,
            page_margin: None,
            line_end: false,
        }
    }

    /// Keep each bell's distance from the end of the line/page when the
    /// layout changes. Bells never move below zero.
    pub fn relayout(&mut self, old: Layout, new: Layout) {
        self.line_margin = self
            .line_margin
            .map(|bell| shift_keeping_distance(bell, old.chars_per_line, new.chars_per_line));
        self.page_margin = self
            .page_margin
            .map(|bell| shift_keeping_distance(bell, old.lines_per_page, new.lines_per_page));
    }
}

fn shift_keeping_distance(bell: usize, old_end: usize, new_end: usize) -> usize {
    let distance = old_end as isize - bell as isize;
    (new_end as isize - distance).max(0) as usize
}

/// Caret watcher for one view, producing at most one [`MarginSignal`] per
/// call. Each view keeps its own; the bells are shared and passed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarginSignaler {
    prev_offset: usize,
    prev_line: usize,
}

impl MarginSignaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a caret placed by the program (undo, redo, load, an edit made
    /// through the other view) without ringing
    pub fn sync_to(&mut self, buffer: &TextBuffer, offset: usize) {
        self.prev_offset = offset;
        self.prev_line = buffer.line_at_offset(offset);
    }

    /// Observe a caret move to `offset`.
    ///
    /// Signals only fire on a single forward step onto the threshold column;
    /// jumps, backward moves and repeated calls at the same spot stay quiet.
    /// When both the margin and the line end qualify, `LineEnd` wins.
    pub fn on_caret_moved(
        &mut self,
        bells: &MarginBells,
        buffer: &TextBuffer,
        layout: &Layout,
        offset: usize,
    ) -> Option<MarginSignal> {
        let stepped = offset == self.prev_offset + 1;
        self.prev_offset = offset;
        if !stepped {
            return None;
        }

        let line = buffer.line_at_offset(offset);
        let column = offset - buffer.offset_at_line(line);

        if bells.line_end && layout.chars_per_line > 0 && column == layout.chars_per_line {
            return Some(MarginSignal::LineEnd);
        }
        match bells.line_margin {
            Some(margin) if margin > 0 && column == margin => Some(MarginSignal::LineMargin),
            _ => None,
        }
    }

    /// Observe a confirmed line (Enter) with the caret at `offset`.
    ///
    /// Rings when the caret moved down exactly one line since the previous
    /// confirmation and that previous line sits two lines above the page
    /// margin bell.
    pub fn on_key_confirm(
        &mut self,
        bells: &MarginBells,
        buffer: &TextBuffer,
        layout: &Layout,
        offset: usize,
    ) -> Option<MarginSignal> {
        let line = buffer.line_at_offset(offset);
        let prev_line = std::mem::replace(&mut self.prev_line, line);

        let margin = bells.page_margin?;
        if layout.lines_per_page == 0 || margin < 2 || line != prev_line + 1 {
            return None;
        }
        (prev_line % layout.lines_per_page == margin - 2).then_some(MarginSignal::PageMargin)
    }
}
