//! Re-flow over-long lines at word boundaries
//!
//! Starting from a line, every line longer than `chars_per_line` is split at
//! a space and its tail is joined with the following line, so the cascade
//! moves down one line at a time. Wrapping stops at a paragraph-end sentinel
//! and never splits a word: a line without a usable space near the margin is
//! left over-length.
//!
//! Each line edit goes through the document like any other edit, so it is
//! undone one line at a time. A multi-line rewrap is not a single undo step.

use super::buffer::PARAGRAPH_END;
use super::document::BrailleDocument;

/// What a rewrap pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewrapReport {
    /// Number of lines split
    pub lines_wrapped: usize,
    /// Over-length lines left alone because no break point was found
    pub unwrappable: Vec<usize>,
    /// Line whose paragraph-end sentinel stopped the cascade
    pub stopped_at: Option<usize>,
}

impl RewrapReport {
    pub fn changed(&self) -> bool {
        self.lines_wrapped > 0
    }
}

/// Re-flow lines from `start_line` to the end of the document or the first
/// paragraph end.
pub fn rewrap_from(doc: &mut BrailleDocument, start_line: usize) -> RewrapReport {
    let mut report = RewrapReport::default();
    let chars_per_line = doc.layout().chars_per_line;
    if chars_per_line == 0 {
        return report;
    }
    let eol = doc.line_ending().as_str();

    let mut index = start_line;
    while index < doc.buffer().line_count() {
        let line: Vec<char> = doc.buffer().line_slice(index).chars().collect();
        let length = line.len();
        if length == 0 {
            index += 1;
            continue;
        }
        let paragraph_end = line[length - 1] == PARAGRAPH_END;

        if length <= chars_per_line {
            if paragraph_end {
                report.stopped_at = Some(index);
                break;
            }
            index += 1;
            continue;
        }

        let Some(split) = find_break(&line, chars_per_line) else {
            tracing::debug!(line = index, length, "no break point near the margin, left as is");
            report.unwrappable.push(index);
            if paragraph_end {
                report.stopped_at = Some(index);
                break;
            }
            index += 1;
            continue;
        };

        let mut replacement: String = line[..split.word_end].iter().collect();
        replacement.push_str(eol);
        replacement.extend(&line[split.wrap_start..]);

        let mut replaced = length;
        if !paragraph_end && index + 1 < doc.buffer().line_count() {
            let next = doc.buffer().line(index + 1);
            replaced += doc.buffer().terminator_length(index) + next.chars().count();
            replacement.push(' ');
            replacement.push_str(&next);
        }

        let offset = doc.buffer().offset_at_line(index);
        doc.replace_range(offset, replaced, &replacement);
        report.lines_wrapped += 1;
        index += 1;
    }

    tracing::debug!(
        start_line,
        wrapped = report.lines_wrapped,
        unwrappable = report.unwrappable.len(),
        "rewrap finished"
    );
    report
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Split {
    /// End of the last word kept on the line
    word_end: usize,
    /// Start of the first word moved to the next line
    wrap_start: usize,
}

/// Locate where to split `line` (longer than `chars_per_line`).
///
/// The word being wrapped must start after `chars_per_line / 2` and the word
/// kept must end after `chars_per_line / 4`, so a line never shrinks to a
/// sliver.
fn find_break(line: &[char], chars_per_line: usize) -> Option<Split> {
    let length = line.len();

    let wrap_start = if line[chars_per_line] != ' ' {
        let lower = chars_per_line / 2;
        let mut at = chars_per_line;
        while at > lower && line[at] != ' ' {
            at -= 1;
        }
        if at == lower {
            return None;
        }
        at + 1
    } else {
        let mut at = chars_per_line;
        while at < length && line[at] == ' ' {
            at += 1;
        }
        if at == length {
            return None;
        }
        at
    };

    let lower = chars_per_line / 4;
    let mut at = wrap_start - 1;
    while at > lower && line[at] == ' ' {
        at -= 1;
    }
    if at == lower {
        return None;
    }

    Some(Split {
        word_end: at + 1,
        wrap_start,
    })
}
