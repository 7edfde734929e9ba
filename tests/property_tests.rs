// Property-based tests using proptest
// These tests generate random documents and edit sequences and verify invariants

mod common;

use common::test_doc;
use proptest::prelude::*;
use zephyr::format::{brf, bzy, BrfReadOptions};
use zephyr::model::{
    rewrap_from, BrailleDocument, Layout, LineEnding, Projection, TextBuffer, PARAGRAPH_END,
};

/// One line of printable ASCII braille, optionally ending a paragraph
fn line_strategy() -> impl Strategy<Value = (String, bool)> {
    ("[ -~]{0,20}", any::<bool>())
}

fn join_lines(lines: &[(String, bool)], eol: &str, sentinels: bool) -> String {
    lines
        .iter()
        .map(|(text, end)| {
            if sentinels && *end {
                format!("{}{}", text, PARAGRAPH_END)
            } else {
                text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(eol)
}

/// A random edit expressed relative to the document it lands in
#[derive(Debug, Clone)]
struct EditOp {
    start: f64,
    length: f64,
    text: String,
}

impl EditOp {
    fn apply(&self, doc: &mut BrailleDocument) {
        let len = doc.buffer().char_count();
        let start = (self.start * len as f64) as usize;
        let start = start.min(len);
        let length = ((self.length * (len - start) as f64) as usize).min(len - start);
        doc.replace_range(start, length, &self.text);
    }
}

fn edit_op_strategy() -> impl Strategy<Value = EditOp> {
    (0.0..=1.0f64, 0.0..0.5f64, "[a-z \n]{0,6}").prop_map(|(start, length, text)| EditOp {
        start,
        length,
        text,
    })
}

/// Words separated by spaces, line breaks and paragraph ends
fn prose_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(("[a-z]{1,12}", 0..10u8), 1..40).prop_map(|words| {
        let mut text = String::new();
        for (word, sep) in words {
            text.push_str(&word);
            match sep {
                0 => text.push('\n'),
                1 => {
                    text.push(PARAGRAPH_END);
                    text.push('\n');
                }
                _ => text.push(' '),
            }
        }
        text
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    /// BZY keeps text, paragraph ends, layout, caret and focus
    #[test]
    fn prop_bzy_round_trip(
        lines in prop::collection::vec(line_strategy(), 1..12),
        chars_per_line in 1usize..80,
        lines_per_page in 0usize..40,
        caret_seed in any::<usize>(),
        ascii_focus in any::<bool>(),
    ) {
        let text = join_lines(&lines, "\n", true);
        let buffer = TextBuffer::from_text(&text);
        let layout = Layout::new(chars_per_line, lines_per_page);
        let caret = caret_seed % (buffer.char_count() + 1);
        let focus = if ascii_focus { Projection::Ascii } else { Projection::Braille };

        let encoded = bzy::encode(&buffer, &layout, caret, focus, LineEnding::Lf);
        let decoded = bzy::decode(encoded.as_bytes()).unwrap();

        prop_assert_eq!(&decoded.text, &text);
        prop_assert_eq!(decoded.header.layout_over(Layout::default()), layout);
        prop_assert_eq!(decoded.header.caret_offset, caret);
        prop_assert_eq!(decoded.header.view_focus, Some(focus));
        prop_assert_eq!(decoded.line_ending, LineEnding::Lf);
    }

    /// BRF reproduces the text and, with an unchanged page length, the page breaks
    #[test]
    fn prop_brf_round_trip(
        lines in prop::collection::vec(line_strategy(), 1..30),
        lines_per_page in 1usize..10,
        crlf in any::<bool>(),
    ) {
        let eol = if crlf { LineEnding::CrLf } else { LineEnding::Lf };
        let text = join_lines(&lines, eol.as_str(), false);
        let buffer = TextBuffer::from_text(&text);

        let encoded = brf::encode(&buffer, &Layout::new(40, lines_per_page), eol);
        let decoded = brf::decode(encoded.as_bytes(), BrfReadOptions::default());

        prop_assert_eq!(&decoded.text, &text);
        if lines.len() > lines_per_page {
            prop_assert_eq!(decoded.lines_per_page, Some(lines_per_page));
        } else {
            prop_assert_eq!(decoded.lines_per_page, None);
        }
        if lines.len() > 1 {
            prop_assert_eq!(decoded.line_ending, eol);
        }
    }

    /// Undoing n edits then redoing them walks back and forth through every state
    #[test]
    fn prop_undo_redo_restores_every_state(
        initial in "[a-z \n]{0,30}",
        ops in prop::collection::vec(edit_op_strategy(), 1..25),
    ) {
        let mut doc = test_doc(&initial, 40);
        let mut states = vec![doc.text()];
        for op in &ops {
            op.apply(&mut doc);
            states.push(doc.text());
        }

        for expected in states.iter().rev().skip(1) {
            prop_assert!(doc.undo());
            prop_assert_eq!(&doc.text(), expected);
        }
        prop_assert!(!doc.undo());

        for expected in states.iter().skip(1) {
            prop_assert!(doc.redo());
            prop_assert_eq!(&doc.text(), expected);
        }
        prop_assert!(!doc.redo());
    }

    /// A save point is clean until exactly one more edit
    #[test]
    fn prop_modified_after_one_edit(
        initial in "[a-z]{0,20}",
        op in edit_op_strategy(),
    ) {
        let mut doc = test_doc(&initial, 40);
        prop_assert!(!doc.is_modified());
        doc.mark_saved();
        prop_assert!(!doc.is_modified());
        op.apply(&mut doc);
        prop_assert!(doc.is_modified());
    }

    /// A second rewrap finds nothing to do
    #[test]
    fn prop_rewrap_is_idempotent(text in prose_strategy(), chars_per_line in 4usize..30) {
        let mut doc = test_doc(&text, chars_per_line);
        rewrap_from(&mut doc, 0);
        let once = doc.text();

        let report = rewrap_from(&mut doc, 0);
        prop_assert!(!report.changed());
        prop_assert_eq!(doc.text(), once);
    }
}
