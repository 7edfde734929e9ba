//! Undo/redo through the document - one slot per logical edit

mod common;

use common::{para, quiet_doc};
use zephyr::model::{BrailleDocument, BufferListener, EditMode, EditRecord, Projection};

use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_undo_restores_deleted_text() {
    let mut doc = quiet_doc("hello world");
    doc.replace_range(5, 6, "");
    assert_eq!(doc.text(), "hello");

    assert!(doc.undo());
    assert_eq!(doc.text(), "hello world");
    // caret after the reinserted text
    assert_eq!(doc.caret(), 11);
}

#[test]
fn test_redo_reapplies_replacement() {
    let mut doc = quiet_doc("hello world");
    doc.replace_range(0, 5, "howdy");
    doc.undo();
    assert_eq!(doc.text(), "hello world");

    assert!(doc.redo());
    assert_eq!(doc.text(), "howdy world");
    assert_eq!(doc.caret(), 5);
}

#[test]
fn test_undo_redo_are_noops_at_the_ends() {
    let mut doc = quiet_doc("abc");
    assert!(!doc.undo());
    assert!(!doc.redo());

    doc.replace_range(3, 0, "d");
    assert!(!doc.redo());
    assert!(doc.undo());
    assert!(!doc.undo());
    assert_eq!(doc.text(), "abc");
}

#[test]
fn test_log_does_not_grow_while_undoing() {
    let mut doc = quiet_doc("");
    for (i, ch) in ["a", "b", "c"].iter().enumerate() {
        doc.replace_range(i, 0, ch);
    }
    assert_eq!(doc.history().len(), 3);

    doc.undo();
    doc.undo();
    doc.redo();
    assert_eq!(doc.history().len(), 3);
    assert_eq!(doc.history().change_index(), 2);
    assert_eq!(doc.text(), "ab");
}

#[test]
fn test_new_edit_discards_redo_tail() {
    let mut doc = quiet_doc("");
    doc.replace_range(0, 0, "a");
    doc.replace_range(1, 0, "b");
    doc.undo();
    doc.replace_range(1, 0, "x");

    assert_eq!(doc.text(), "ax");
    assert!(!doc.redo());
    assert_eq!(doc.history().len(), 2);
    doc.undo();
    doc.undo();
    assert_eq!(doc.text(), "");
}

#[test]
fn test_modified_tracks_save_point() {
    let mut doc = quiet_doc("abc");
    assert!(!doc.is_modified());

    doc.replace_range(0, 0, "x");
    assert!(doc.is_modified());

    doc.mark_saved();
    assert!(!doc.is_modified());

    doc.undo();
    assert!(doc.is_modified());
    doc.redo();
    assert!(!doc.is_modified());
}

#[test]
fn test_set_text_clears_history() {
    let mut doc = quiet_doc("abc");
    doc.replace_range(0, 0, "x");
    doc.set_text("fresh");
    assert!(!doc.is_modified());
    assert!(!doc.undo());
    assert_eq!(doc.text(), "fresh");
}

#[test]
fn test_paragraph_end_toggle_is_undoable() {
    let mut doc = quiet_doc("first\nsecond");
    assert!(doc.toggle_paragraph_end(0));
    assert_eq!(doc.text(), format!("{}\nsecond", para("first")));
    assert_eq!(doc.paragraph_ends(), vec![0]);

    assert!(doc.toggle_paragraph_end(0));
    assert_eq!(doc.text(), "first\nsecond");

    doc.undo();
    assert_eq!(doc.paragraph_ends(), vec![0]);
    doc.undo();
    assert!(doc.paragraph_ends().is_empty());
}

#[test]
fn test_edit_in_one_view_moves_the_other_caret() {
    let mut doc = quiet_doc("abc def");
    doc.set_focus(Projection::Ascii);
    doc.set_caret(6);
    doc.set_focus(Projection::Braille);
    doc.set_caret(0);

    doc.insert_at_caret("xx");
    assert_eq!(doc.caret(), 2);
    assert_eq!(doc.view(Projection::Ascii).caret, 8);
}

#[derive(Default)]
struct Log {
    modes: Vec<EditMode>,
    replaced: usize,
}

struct Recorder(Rc<RefCell<Log>>);

impl BufferListener for Recorder {
    fn buffer_changed(&mut self, _edit: &EditRecord, mode: EditMode) {
        self.0.borrow_mut().modes.push(mode);
    }

    fn document_replaced(&mut self) {
        self.0.borrow_mut().replaced += 1;
    }
}

#[test]
fn test_listeners_see_every_mutation_with_its_mode() {
    let log = Rc::new(RefCell::new(Log::default()));
    let mut doc = BrailleDocument::new();
    doc.add_listener(Box::new(Recorder(log.clone())));

    doc.replace_range(0, 0, "abc");
    doc.undo();
    doc.redo();
    doc.set_text("new");

    let log = log.borrow();
    assert_eq!(
        log.modes,
        vec![EditMode::Normal, EditMode::Undoing, EditMode::Redoing]
    );
    assert_eq!(log.replaced, 1);
}
