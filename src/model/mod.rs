//! Document model - the editing core
//!
//! One [`TextBuffer`] is the single source of truth. The [`ChangeLog`]
//! observes every edit made through [`BrailleDocument`], the braille and ascii
//! views are plain [`ViewState`] records over the same buffer, and the
//! [`MarginSignaler`] turns caret motion into typewriter-style cues.

pub mod braille;
pub mod buffer;
pub mod document;
pub mod history;
pub mod layout;
pub mod rewrap;
pub mod scroll_sync;
pub mod signals;

pub use braille::ChordEntry;
pub use buffer::{EditRecord, TextBuffer, PARAGRAPH_END};
pub use document::{BrailleDocument, BufferListener, Projection, ViewState};
pub use history::{ChangeLog, EditMode};
pub use layout::{Layout, LineEnding, DEFAULT_CHARS_PER_LINE, DEFAULT_LINES_PER_PAGE};
pub use rewrap::{rewrap_from, RewrapReport};
pub use scroll_sync::{adjust_other, ReconcileTask, ScrollAdjustment, ScrollSync, SyncRequest, TaskStep, ViewGeometry};
pub use signals::{MarginBells, MarginSignal, MarginSignaler};
