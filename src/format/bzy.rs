//! BZY, the native document format
//!
//! A header of `Key value...` lines ended by a `HeaderEnd` line, then the
//! document body. Paragraph ends are stored as a trailing pilcrow on their
//! line. Unlike BRF this format is strict: a header that never ends, or that
//! is mostly unknown keys, is rejected.

use std::io::{Read, Write};

use crate::model::buffer::{TextBuffer, PARAGRAPH_END};
use crate::model::document::Projection;
use crate::model::layout::{Layout, LineEnding};

use super::error::FormatError;

/// On-disk paragraph-end marker
pub const PARAGRAPH_MARK: char = '\u{b6}';

/// Unknown header keys tolerated before the file is rejected
pub const MAX_UNKNOWN_KEYS: usize = 6;

const HEADER_END: &str = "HeaderEnd";

/// Everything the header says. Keys missing from the file stay `None` (or
/// their default) so the caller can keep its current setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BzyHeader {
    /// Version triple of the writer, informational only
    pub version: Option<String>,
    pub chars_per_line: Option<usize>,
    pub lines_per_page: Option<usize>,
    pub caret_offset: usize,
    pub view_focus: Option<Projection>,
    /// The body ends with a line terminator
    pub return_at_end: bool,
}

impl BzyHeader {
    /// Header layout over `current` for keys the file did not set
    pub fn layout_over(&self, current: Layout) -> Layout {
        Layout {
            chars_per_line: self.chars_per_line.unwrap_or(current.chars_per_line),
            lines_per_page: self.lines_per_page.unwrap_or(current.lines_per_page),
        }
    }
}

/// Decoded BZY file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BzyContents {
    pub header: BzyHeader,
    /// Document text with paragraph marks turned into sentinels
    pub text: String,
    /// Terminator of the first line in the file
    pub line_ending: LineEnding,
}

/// Lines of `text` split on CRLF, LF or CR. A final terminator does not
/// open an empty line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(pos) => {
                lines.push(&rest[..pos]);
                let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

fn number(key: &str, value: Option<&str>) -> Result<usize, FormatError> {
    let value = value.ok_or_else(|| FormatError::invalid(format!("{} without a value", key)))?;
    value
        .parse()
        .map_err(|_| FormatError::invalid(format!("bad {} value: {}", key, value)))
}

/// Read a BZY stream
pub fn read<R: Read>(mut reader: R) -> Result<BzyContents, FormatError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode(&bytes)
}

/// Decode BZY bytes already in memory
pub fn decode(bytes: &[u8]) -> Result<BzyContents, FormatError> {
    let source = std::str::from_utf8(bytes)
        .map_err(|err| FormatError::invalid(format!("not UTF-8: {}", err)))?;
    let line_ending = LineEnding::detect(source).unwrap_or_else(LineEnding::platform);
    let mut lines = split_lines(source).into_iter();

    let mut header = BzyHeader::default();
    let mut unknown = 0;
    let mut terminated = false;
    for line in lines.by_ref() {
        let mut tokens = line.split(' ');
        let key = tokens.next().unwrap_or_default();
        match key {
            "Version" => header.version = Some(tokens.collect::<Vec<_>>().join(".")),
            "CharsPerLine" => header.chars_per_line = Some(number(key, tokens.next())?),
            "LinesPerPage" => header.lines_per_page = Some(number(key, tokens.next())?),
            "CaretOffset" => header.caret_offset = number(key, tokens.next())?,
            "ViewFocus" => match tokens.next().and_then(Projection::parse) {
                Some(focus) => header.view_focus = Some(focus),
                None => tracing::error!(line, "invalid ViewFocus value"),
            },
            "ReturnAtEnd" => {
                header.return_at_end = tokens
                    .next()
                    .is_some_and(|value| value.eq_ignore_ascii_case("true"))
            }
            HEADER_END => {
                terminated = true;
                break;
            }
            _ => {
                tracing::warn!(line, "unknown file format parameter");
                unknown += 1;
                if unknown > MAX_UNKNOWN_KEYS {
                    return Err(FormatError::invalid("too many unknown header keys"));
                }
            }
        }
    }
    if !terminated {
        return Err(FormatError::invalid("missing HeaderEnd"));
    }

    let eol = line_ending.as_str();
    let mut text = String::with_capacity(source.len());
    for (index, line) in lines.enumerate() {
        if index > 0 {
            text.push_str(eol);
        }
        match line.strip_suffix(PARAGRAPH_MARK) {
            Some(body) => {
                text.push_str(body);
                text.push(PARAGRAPH_END);
            }
            None => text.push_str(line),
        }
    }
    if header.return_at_end {
        text.push_str(eol);
    }

    Ok(BzyContents {
        header,
        text,
        line_ending,
    })
}

/// Render a buffer and its editor state as a BZY file
pub fn encode(
    buffer: &TextBuffer,
    layout: &Layout,
    caret_offset: usize,
    focus: Projection,
    line_ending: LineEnding,
) -> String {
    let eol = line_ending.as_str();
    let return_at_end = !buffer.is_empty() && buffer.line_length(buffer.line_count() - 1) == 0;

    let mut out = String::with_capacity(buffer.char_count() + 128);
    out.push_str(&format!(
        "Version {} {} {}{eol}",
        env!("CARGO_PKG_VERSION_MAJOR"),
        env!("CARGO_PKG_VERSION_MINOR"),
        env!("CARGO_PKG_VERSION_PATCH"),
    ));
    out.push_str(&format!("CharsPerLine {}{eol}", layout.chars_per_line));
    out.push_str(&format!("LinesPerPage {}{eol}", layout.lines_per_page));
    out.push_str(&format!("CaretOffset {}{eol}", caret_offset));
    out.push_str(&format!("ViewFocus {}{eol}", focus.as_str()));
    out.push_str(&format!("ReturnAtEnd {}{eol}", return_at_end));
    out.push_str(HEADER_END);
    out.push_str(eol);

    for (index, line) in buffer.lines().enumerate() {
        if index > 0 {
            out.push_str(eol);
        }
        match line.strip_suffix(PARAGRAPH_END) {
            Some(body) => {
                out.push_str(body);
                out.push(PARAGRAPH_MARK);
            }
            None => out.push_str(&line),
        }
    }
    out
}

/// Write a buffer and its editor state as BZY
pub fn write<W: Write>(
    mut writer: W,
    buffer: &TextBuffer,
    layout: &Layout,
    caret_offset: usize,
    focus: Projection,
    line_ending: LineEnding,
) -> Result<(), FormatError> {
    let text = encode(buffer, layout, caret_offset, focus, line_ending);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}
