//! Document model - one buffer, its history and the two projections onto it
//!
//! The braille view and the ascii view never hold text of their own. Each is
//! a small [`ViewState`] (caret and scroll position) that indexes into the
//! single [`TextBuffer`], so an edit made through either view is visible in
//! the other at once.

use std::fmt;
use std::path::PathBuf;

use super::braille;
use super::buffer::{EditRecord, TextBuffer, PARAGRAPH_END};
use super::history::{ChangeLog, EditMode};
use super::layout::{Layout, LineEnding};
use super::rewrap::{rewrap_from, RewrapReport};
use super::signals::{MarginBells, MarginSignal, MarginSignaler};

/// The two synchronized views of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Projection {
    /// Text drawn as braille cells
    #[default]
    Braille,
    /// Text drawn as ASCII braille characters
    Ascii,
}

impl Projection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Braille => "braille",
            Self::Ascii => "ascii",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "braille" => Some(Self::Braille),
            "ascii" => Some(Self::Ascii),
            _ => None,
        }
    }

    /// The view that is not this one
    pub fn other(&self) -> Self {
        match self {
            Self::Braille => Self::Ascii,
            Self::Ascii => Self::Braille,
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Braille => 0,
            Self::Ascii => 1,
        }
    }

    /// Display text of a buffer line in this view: the paragraph-end
    /// sentinel is dropped and the braille view maps to Unicode cells
    pub fn render_line(&self, line: &str) -> String {
        let line = line.strip_suffix(PARAGRAPH_END).unwrap_or(line);
        match self {
            Self::Braille => line.chars().map(braille::ascii_to_unicode).collect(),
            Self::Ascii => line.to_string(),
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-view state: everything a view owns besides the shared text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    /// Caret character offset into the shared buffer
    pub caret: usize,
    /// Vertical scroll position in pixels
    pub top_pixel: i32,
    signaler: MarginSignaler,
}

impl ViewState {
    /// Move the caret so it keeps pointing at the same text after `edit`
    fn follow_edit(&mut self, edit: &EditRecord) {
        let replaced_end = edit.start_offset + edit.replaced_text.chars().count();
        if self.caret >= replaced_end {
            self.caret = (self.caret as isize + edit.length_delta()) as usize;
        } else if self.caret > edit.start_offset {
            self.caret = edit.start_offset;
        }
    }
}

/// Collaborators told about every buffer mutation (redraw, caret sync)
pub trait BufferListener {
    /// An edit has been applied to the buffer
    fn buffer_changed(&mut self, edit: &EditRecord, mode: EditMode);

    /// The whole content was replaced (new or loaded document)
    fn document_replaced(&mut self) {}
}

/// A braille document: text, history, layout and view state
pub struct BrailleDocument {
    buffer: TextBuffer,
    history: ChangeLog,
    layout: Layout,
    line_ending: LineEnding,
    views: [ViewState; 2],
    focus: Projection,
    bells: MarginBells,
    listeners: Vec<Box<dyn BufferListener>>,
    /// Path to the file on disk (None for new/unsaved documents)
    pub file_path: Option<PathBuf>,
}

impl fmt::Debug for BrailleDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrailleDocument")
            .field("buffer", &self.buffer)
            .field("history", &self.history)
            .field("layout", &self.layout)
            .field("line_ending", &self.line_ending)
            .field("views", &self.views)
            .field("focus", &self.focus)
            .field("bells", &self.bells)
            .field("file_path", &self.file_path)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for BrailleDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl BrailleDocument {
    /// Create a new empty document
    pub fn new() -> Self {
        Self {
            buffer: TextBuffer::new(),
            history: ChangeLog::new(),
            layout: Layout::default(),
            line_ending: LineEnding::platform(),
            views: [ViewState::default(); 2],
            focus: Projection::Braille,
            bells: MarginBells::default(),
            listeners: Vec::new(),
            file_path: None,
        }
    }

    /// Create a document with initial text and empty history
    pub fn with_text(text: &str) -> Self {
        let mut doc = Self::new();
        doc.buffer.set_text(text);
        doc
    }

    /// Create an empty document with the given layout and bells
    pub fn with_settings(layout: Layout, bells: MarginBells) -> Self {
        let mut doc = Self::new();
        doc.layout = layout;
        doc.bells = bells;
        doc
    }

    /// Get the display name for this document
    pub fn display_name(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn history(&self) -> &ChangeLog {
        &self.history
    }

    /// Whole content as a String
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Change the layout; bells keep their distance from the line and page
    /// ends. Existing lines are not re-flowed.
    pub fn set_layout(&mut self, layout: Layout) {
        let old = self.layout;
        self.layout = layout;
        self.bells.relayout(old, layout);
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    pub fn bells(&self) -> MarginBells {
        self.bells
    }

    pub fn set_bells(&mut self, bells: MarginBells) {
        self.bells = bells;
    }

    pub fn add_listener(&mut self, listener: Box<dyn BufferListener>) {
        self.listeners.push(listener);
    }

    // === Views ===

    pub fn focus(&self) -> Projection {
        self.focus
    }

    pub fn set_focus(&mut self, projection: Projection) {
        self.focus = projection;
    }

    pub fn view(&self, projection: Projection) -> &ViewState {
        &self.views[projection.index()]
    }

    pub fn view_mut(&mut self, projection: Projection) -> &mut ViewState {
        &mut self.views[projection.index()]
    }

    /// Caret offset of the focused view
    pub fn caret(&self) -> usize {
        self.view(self.focus).caret
    }

    /// Move the focused view's caret, clamped to the buffer. Returns the
    /// margin signal the move produced, if any.
    pub fn set_caret(&mut self, offset: usize) -> Option<MarginSignal> {
        let offset = offset.min(self.buffer.char_count());
        let view = &mut self.views[self.focus.index()];
        view.caret = offset;
        view.signaler
            .on_caret_moved(&self.bells, &self.buffer, &self.layout, offset)
    }

    /// Place both carets for freshly installed content (loading a file)
    fn place_carets(&mut self, offset: usize) {
        self.mirror_caret(offset.min(self.buffer.char_count()));
    }

    /// Put the caret of both views at `offset`. The next single step from
    /// there counts as a step, but the placement itself never rings.
    fn mirror_caret(&mut self, offset: usize) {
        for view in &mut self.views {
            view.caret = offset;
            view.signaler.sync_to(&self.buffer, offset);
        }
    }

    /// The user confirmed a line (Enter) in the focused view
    pub fn confirm_line(&mut self) -> Option<MarginSignal> {
        let view = &mut self.views[self.focus.index()];
        view.signaler
            .on_key_confirm(&self.bells, &self.buffer, &self.layout, view.caret)
    }

    /// Line holding the focused caret
    pub fn caret_line(&self) -> usize {
        self.buffer.line_at_offset(self.caret())
    }

    // === Editing ===

    /// Replace `length` characters at `start` with `text` as a fresh edit
    pub fn replace_range(&mut self, start: usize, length: usize, text: &str) -> EditRecord {
        self.apply_edit(start, length, text, EditMode::Normal)
    }

    /// Insert `text` at the focused caret and move the caret past it
    pub fn insert_at_caret(&mut self, text: &str) -> Option<MarginSignal> {
        let caret = self.caret();
        let edit = self.replace_range(caret, 0, text);
        self.set_caret(edit.start_offset + edit.inserted_length)
    }

    /// Apply an edit to the buffer and route the resulting record to the
    /// history, the views and the listeners
    fn apply_edit(&mut self, start: usize, length: usize, text: &str, mode: EditMode) -> EditRecord {
        let edit = self.buffer.replace_range(start, length, text);
        let focus = self.focus;
        for (index, view) in self.views.iter_mut().enumerate() {
            view.follow_edit(&edit);
            // the focused view reports its own caret move
            if index != focus.index() {
                view.signaler.sync_to(&self.buffer, view.caret);
            }
        }
        for listener in &mut self.listeners {
            listener.buffer_changed(&edit, mode);
        }
        self.history.record(edit.clone(), mode);
        edit
    }

    /// Undo the last change. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.history.begin_undo() else {
            return false;
        };
        tracing::debug!(offset = record.start_offset, "undo");
        let applied = self.apply_edit(
            record.start_offset,
            record.inserted_length,
            &record.replaced_text,
            EditMode::Undoing,
        );
        self.mirror_caret(applied.start_offset + applied.inserted_length);
        true
    }

    /// Redo the last undone change. Returns false when there is nothing to
    /// redo.
    pub fn redo(&mut self) -> bool {
        let Some(record) = self.history.begin_redo() else {
            return false;
        };
        tracing::debug!(offset = record.start_offset, "redo");
        let applied = self.apply_edit(
            record.start_offset,
            record.inserted_length,
            &record.replaced_text,
            EditMode::Redoing,
        );
        self.mirror_caret(applied.start_offset + applied.inserted_length);
        true
    }

    /// Whether there are changes since the last save
    pub fn is_modified(&self) -> bool {
        self.history.is_modified()
    }

    /// Record a successful save
    pub fn mark_saved(&mut self) {
        self.history.mark_saved();
    }

    /// Replace the whole content, dropping history (new document)
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.history.clear();
        self.place_carets(0);
        for listener in &mut self.listeners {
            listener.document_replaced();
        }
    }

    /// Install freshly decoded content: text, layout and caret
    pub fn replace_contents(&mut self, text: &str, layout: Layout, caret: usize) {
        self.set_text(text);
        self.layout = layout;
        self.place_carets(caret);
    }

    /// Add the paragraph-end sentinel to line `index`, or remove it if the
    /// line already has one. Empty lines are left alone.
    pub fn toggle_paragraph_end(&mut self, index: usize) -> bool {
        let length = self.buffer.line_length(index);
        if length == 0 {
            return false;
        }
        let offset = self.buffer.offset_at_line(index);
        if self.buffer.has_paragraph_end(index) {
            self.replace_range(offset + length - 1, 1, "");
        } else {
            self.replace_range(offset + length, 0, &PARAGRAPH_END.to_string());
        }
        true
    }

    /// Re-flow over-long lines starting at the caret line
    pub fn rewrap_from_caret(&mut self) -> RewrapReport {
        let line = self.caret_line();
        rewrap_from(self, line)
    }

    /// Lines that carry a paragraph end
    pub fn paragraph_ends(&self) -> Vec<usize> {
        (0..self.buffer.line_count())
            .filter(|&i| self.buffer.has_paragraph_end(i))
            .collect()
    }
}
