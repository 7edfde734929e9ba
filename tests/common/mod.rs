//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;
use zephyr::model::{BrailleDocument, Layout, LineEnding, MarginBells, PARAGRAPH_END};

/// Document with `text`, LF line endings and the given line length
pub fn test_doc(text: &str, chars_per_line: usize) -> BrailleDocument {
    let mut doc = BrailleDocument::with_text(text);
    doc.set_layout(Layout::new(chars_per_line, 25));
    doc.set_line_ending(LineEnding::Lf);
    doc
}

/// Document with every bell silenced
pub fn quiet_doc(text: &str) -> BrailleDocument {
    let mut doc = test_doc(text, 40);
    doc.set_bells(MarginBells::silent());
    doc
}

/// `text` with the paragraph-end sentinel appended
pub fn para(text: &str) -> String {
    format!("{}{}", text, PARAGRAPH_END)
}

/// Write `contents` to `name` in a fresh temporary directory
pub fn temp_file(name: &str, contents: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write temp file");
    (dir, path)
}
