//! Change log (undo/redo) for the document buffer.
//!
//! Every buffer edit is observed here as an [`EditRecord`]. Undo and redo
//! share one slot per logical edit: applying a record through the buffer
//! produces a fresh record whose `replaced_text` is the text just taken out,
//! and storing that back into the same slot turns the slot into the inverse
//! needed for the opposite operation.

use super::buffer::EditRecord;

/// How an observed edit came about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// A fresh user or engine edit
    #[default]
    Normal,
    /// The inverse applied by [`ChangeLog::begin_undo`]
    Undoing,
    /// The inverse applied by [`ChangeLog::begin_redo`]
    Redoing,
}

/// Edit history with a single record list and two cursors.
///
/// `change_index` separates undoable records (before it) from redoable ones
/// (at and after it). `save_index` is where `change_index` stood at the last
/// successful save.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    records: Vec<EditRecord>,
    change_index: usize,
    save_index: usize,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self {
            records: Vec::with_capacity(1000),
            change_index: 0,
            save_index: 0,
        }
    }

    /// Observe an edit that has just been applied to the buffer
    pub fn record(&mut self, edit: EditRecord, mode: EditMode) {
        match mode {
            EditMode::Normal => {
                // the saved state is being discarded with the redo tail
                if self.save_index > self.change_index {
                    self.save_index = usize::MAX;
                }
                self.records.truncate(self.change_index);
                self.records.push(edit);
                self.change_index += 1;
            }
            EditMode::Undoing => {
                debug_assert!(self.change_index < self.records.len());
                self.records[self.change_index] = edit;
            }
            EditMode::Redoing => {
                debug_assert!(self.change_index < self.records.len());
                self.records[self.change_index] = edit;
                self.change_index += 1;
            }
        }
    }

    /// Step back one record and return it for the caller to apply under
    /// [`EditMode::Undoing`]. `None` when there is nothing to undo.
    pub fn begin_undo(&mut self) -> Option<EditRecord> {
        if self.change_index == 0 {
            return None;
        }
        self.change_index -= 1;
        Some(self.records[self.change_index].clone())
    }

    /// Return the record to re-apply under [`EditMode::Redoing`]. The cursor
    /// advances when the resulting edit is recorded. `None` when there is
    /// nothing to redo.
    pub fn begin_redo(&self) -> Option<EditRecord> {
        self.records.get(self.change_index).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.change_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.change_index < self.records.len()
    }

    /// Whether the document differs from what was last saved
    pub fn is_modified(&self) -> bool {
        self.save_index != self.change_index
    }

    /// Remember the current position as the saved state
    pub fn mark_saved(&mut self) {
        self.save_index = self.change_index;
    }

    /// Drop all history (new or freshly loaded document)
    pub fn clear(&mut self) {
        self.records.clear();
        self.change_index = 0;
        self.save_index = 0;
    }

    pub fn change_index(&self) -> usize {
        self.change_index
    }

    pub fn save_index(&self) -> usize {
        self.save_index
    }

    /// Number of stored records (undoable plus redoable)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
