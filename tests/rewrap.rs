//! Rewrap through the document - caret-driven, paragraph-bounded

mod common;

use common::{para, test_doc};
use zephyr::model::{rewrap_from, LineEnding};

#[test]
fn test_rewrap_from_caret_line() {
    let mut doc = test_doc("short\nthe quick brown fox jumps", 12);
    doc.set_caret(6);
    let report = doc.rewrap_from_caret();
    assert_eq!(doc.text(), "short\nthe quick\nbrown fox\njumps");
    assert_eq!(report.lines_wrapped, 2);
}

#[test]
fn test_cascade_stops_at_paragraph_boundary() {
    let text = format!(
        "{}\n{}",
        para("one two three four five"),
        "six seven eight nine ten"
    );
    let mut doc = test_doc(&text, 10);
    let report = rewrap_from(&mut doc, 0);

    assert_eq!(
        doc.text(),
        format!("one two\nthree four\n{}\nsix seven eight nine ten", para("five"))
    );
    assert_eq!(report.stopped_at, Some(2));
}

#[test]
fn test_merged_lines_keep_following_paragraph_end() {
    let text = format!("aaa bbb ccc\n{}\nnext", para("ddd"));
    let mut doc = test_doc(&text, 8);
    rewrap_from(&mut doc, 0);
    assert_eq!(doc.text(), format!("aaa bbb\n{}\nnext", para("ccc ddd")));
}

#[test]
fn test_lines_within_length_untouched() {
    let mut doc = test_doc("one\ntwo\nthree", 10);
    let report = rewrap_from(&mut doc, 0);
    assert!(!report.changed());
    assert!(!doc.is_modified());
}

#[test]
fn test_empty_lines_are_skipped() {
    let mut doc = test_doc("\n\nabc def ghi", 8);
    rewrap_from(&mut doc, 0);
    assert_eq!(doc.text(), "\n\nabc def\nghi");
}

#[test]
fn test_rewrap_uses_document_line_ending() {
    let mut doc = test_doc("aaa bbb ccc", 8);
    doc.set_line_ending(LineEnding::CrLf);
    rewrap_from(&mut doc, 0);
    assert_eq!(doc.text(), "aaa bbb\r\nccc");
}

#[test]
fn test_unwrappable_line_with_paragraph_end_halts() {
    let text = format!("{}\nxx yy zz ww", para("abcdefghijklmnop"));
    let mut doc = test_doc(&text, 8);
    let report = rewrap_from(&mut doc, 0);
    assert_eq!(doc.text(), text);
    assert_eq!(report.unwrappable, vec![0]);
    assert_eq!(report.stopped_at, Some(0));
}

#[test]
fn test_undo_after_rewrap_reverts_one_line_at_a_time() {
    let mut doc = test_doc("aaa bbb ccc ddd\neee", 8);
    let report = rewrap_from(&mut doc, 0);
    assert_eq!(doc.text(), "aaa bbb\nccc ddd\neee");
    assert_eq!(report.lines_wrapped, 2);

    assert!(doc.undo());
    assert_eq!(doc.text(), "aaa bbb\nccc ddd eee");
    assert!(doc.undo());
    assert_eq!(doc.text(), "aaa bbb ccc ddd\neee");
}
