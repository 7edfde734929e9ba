//! BRF, the ready-to-emboss braille format
//!
//! Plain ASCII braille with form feeds between pages and no header. Reading
//! is best effort: the line ending and the page length are inferred from the
//! first window of input and anything unexpected is kept as text.

use std::io::{Read, Write};

use crate::model::buffer::{TextBuffer, PARAGRAPH_END};
use crate::model::layout::{Layout, LineEnding};

use super::error::FormatError;

/// Page separator
pub const FORM_FEED: u8 = 0x0c;

/// Bytes examined for the line ending and the first page break
pub const DEFAULT_SCAN_WINDOW: usize = 65536;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrfReadOptions {
    /// Size of each read, and of the window searched for the first form feed
    pub scan_window: usize,
}

impl Default for BrfReadOptions {
    fn default() -> Self {
        Self {
            scan_window: DEFAULT_SCAN_WINDOW,
        }
    }
}

/// Decoded BRF file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrfContents {
    /// Document text with form feeds removed
    pub text: String,
    pub line_ending: LineEnding,
    /// Lines before the first form feed, when one was found in the first
    /// window after at least one line
    pub lines_per_page: Option<usize>,
}

/// What the first window told us
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Inference {
    line_ending: LineEnding,
    /// Line feeds before the first form feed, `None` without a form feed
    lines_before_form_feed: Option<usize>,
}

fn infer(window: &[u8]) -> Inference {
    let mut line_ending = LineEnding::Lf;
    let mut lines = 0;
    for &byte in window {
        match byte {
            b'\n' => lines += 1,
            b'\r' => line_ending = LineEnding::CrLf,
            FORM_FEED => {
                return Inference {
                    line_ending,
                    lines_before_form_feed: Some(lines),
                }
            }
            _ => {}
        }
    }
    Inference {
        line_ending,
        lines_before_form_feed: None,
    }
}

/// Read a BRF stream. Only I/O failures are errors.
pub fn read<R: Read>(mut reader: R, options: BrfReadOptions) -> Result<BrfContents, FormatError> {
    let scan_window = options.scan_window.max(1);
    let mut bytes = Vec::new();
    let mut window = Vec::with_capacity(scan_window);
    let mut inference = None;

    loop {
        window.clear();
        let count = reader
            .by_ref()
            .take(scan_window as u64)
            .read_to_end(&mut window)?;
        if count == 0 {
            break;
        }

        let found = *inference.get_or_insert_with(|| infer(&window));
        if found.lines_before_form_feed.is_some() {
            bytes.extend(window.iter().copied().filter(|&b| b != FORM_FEED));
        } else {
            bytes.extend_from_slice(&window);
        }
    }

    let contents = match inference {
        Some(found) => BrfContents {
            text: String::from_utf8_lossy(&bytes).into_owned(),
            line_ending: found.line_ending,
            lines_per_page: found.lines_before_form_feed.filter(|&lines| lines > 0),
        },
        None => BrfContents {
            text: String::new(),
            line_ending: LineEnding::platform(),
            lines_per_page: None,
        },
    };
    tracing::debug!(
        chars = contents.text.len(),
        eol = %contents.line_ending,
        lines_per_page = ?contents.lines_per_page,
        "read brf"
    );
    Ok(contents)
}

/// Decode BRF bytes already in memory
pub fn decode(bytes: &[u8], options: BrfReadOptions) -> BrfContents {
    match read(bytes, options) {
        Ok(contents) => contents,
        // reading from a slice cannot fail
        Err(_) => BrfContents {
            text: String::from_utf8_lossy(bytes).into_owned(),
            line_ending: LineEnding::platform(),
            lines_per_page: None,
        },
    }
}

/// Render a buffer as BRF text: lines joined by `line_ending`, a form feed
/// before the first line of every page but the first, sentinels dropped
pub fn encode(buffer: &TextBuffer, layout: &Layout, line_ending: LineEnding) -> String {
    let mut out = String::with_capacity(buffer.char_count() + buffer.line_count());
    for (index, line) in buffer.lines().enumerate() {
        if index > 0 {
            out.push_str(line_ending.as_str());
            if layout.is_first_line_of_page(index) {
                out.push(FORM_FEED as char);
            }
        }
        out.push_str(line.strip_suffix(PARAGRAPH_END).unwrap_or(&line));
    }
    out
}

/// Write a buffer as BRF
pub fn write<W: Write>(
    mut writer: W,
    buffer: &TextBuffer,
    layout: &Layout,
    line_ending: LineEnding,
) -> Result<(), FormatError> {
    writer.write_all(encode(buffer, layout, line_ending).as_bytes())?;
    writer.flush()?;
    Ok(())
}
