//! Document files: codec selection, loading and saving
//!
//! `.bzy` files use the native format, everything else is read and written
//! as BRF. Files ending in `.brf` are written ASCII only.

pub mod brf;
pub mod bzy;
pub mod error;

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

pub use brf::{BrfContents, BrfReadOptions};
pub use bzy::{BzyContents, BzyHeader};
pub use error::FormatError;

use crate::model::document::BrailleDocument;
use crate::model::layout::Layout;

/// Codec for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Brf,
    Bzy,
}

impl FileFormat {
    /// Pick the codec from the file extension
    pub fn from_path(path: &Path) -> Self {
        if has_extension(path, "bzy") {
            Self::Bzy
        } else {
            Self::Brf
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Brf => "BRF",
            Self::Bzy => "BZY",
        }
    }
}

/// Byte encoding used when writing a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Seven-bit ASCII, other characters become `?`
    Ascii,
    Utf8,
}

impl TextEncoding {
    pub fn for_path(path: &Path) -> Self {
        if has_extension(path, "brf") {
            Self::Ascii
        } else {
            Self::Utf8
        }
    }

    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Ascii => text
                .chars()
                .map(|ch| if ch.is_ascii() { ch as u8 } else { b'?' })
                .collect(),
        }
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// A fully decoded file, not yet installed in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Brf(BrfContents),
    Bzy(BzyContents),
}

impl Decoded {
    /// Decode `reader` with the codec for `format`
    pub fn read<R: Read>(
        format: FileFormat,
        reader: R,
        options: BrfReadOptions,
    ) -> Result<Self, FormatError> {
        match format {
            FileFormat::Brf => brf::read(reader, options).map(Self::Brf),
            FileFormat::Bzy => bzy::read(reader).map(Self::Bzy),
        }
    }

    /// Replace the document's content and history with this file. Settings
    /// the file does not carry keep their current values.
    pub fn apply_to(self, doc: &mut BrailleDocument) {
        let current = doc.layout();
        match self {
            Self::Brf(contents) => {
                let layout = Layout {
                    lines_per_page: contents.lines_per_page.unwrap_or(current.lines_per_page),
                    ..current
                };
                doc.replace_contents(&contents.text, layout, 0);
                doc.set_line_ending(contents.line_ending);
            }
            Self::Bzy(contents) => {
                let layout = contents.header.layout_over(current);
                doc.replace_contents(&contents.text, layout, contents.header.caret_offset);
                doc.set_line_ending(contents.line_ending);
                if let Some(focus) = contents.header.view_focus {
                    doc.set_focus(focus);
                }
            }
        }
    }
}

/// Serialize a document with the codec for `format`
pub fn encode(doc: &BrailleDocument, format: FileFormat) -> String {
    match format {
        FileFormat::Brf => brf::encode(doc.buffer(), &doc.layout(), doc.line_ending()),
        FileFormat::Bzy => bzy::encode(
            doc.buffer(),
            &doc.layout(),
            doc.caret(),
            doc.focus(),
            doc.line_ending(),
        ),
    }
}

/// Load `path` into `doc`. On failure the document is left untouched.
pub fn load_file(
    doc: &mut BrailleDocument,
    path: &Path,
    options: BrfReadOptions,
) -> Result<FileFormat, FormatError> {
    let format = FileFormat::from_path(path);
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => FormatError::NotFound(path.to_path_buf()),
        _ => FormatError::Io(err),
    })?;
    let decoded = Decoded::read(format, io::BufReader::new(file), options)?;
    decoded.apply_to(doc);
    doc.file_path = Some(path.to_path_buf());
    tracing::info!(path = %path.display(), format = format.name(), "loaded document");
    Ok(format)
}

/// Save `doc` to `path` and mark it unmodified
pub fn save_file(doc: &mut BrailleDocument, path: &Path) -> Result<FileFormat, FormatError> {
    let format = FileFormat::from_path(path);
    let bytes = TextEncoding::for_path(path).encode(&encode(doc, format));

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;

    doc.file_path = Some(path.to_path_buf());
    doc.mark_saved();
    tracing::info!(path = %path.display(), format = format.name(), "saved document");
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::buffer::PARAGRAPH_END;
    use crate::model::document::Projection;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.bzy")), FileFormat::Bzy);
        assert_eq!(FileFormat::from_path(Path::new("a.BZY")), FileFormat::Bzy);
        assert_eq!(FileFormat::from_path(Path::new("a.brf")), FileFormat::Brf);
        assert_eq!(FileFormat::from_path(Path::new("a.txt")), FileFormat::Brf);
        assert_eq!(FileFormat::from_path(Path::new("noext")), FileFormat::Brf);
    }

    #[test]
    fn test_brf_files_are_written_ascii() {
        assert_eq!(TextEncoding::for_path(Path::new("a.brf")), TextEncoding::Ascii);
        assert_eq!(TextEncoding::for_path(Path::new("a.txt")), TextEncoding::Utf8);
        assert_eq!(TextEncoding::Ascii.encode("a\u{b6}b"), b"a?b");
        assert_eq!(TextEncoding::Utf8.encode("a\u{b6}"), "a\u{b6}".as_bytes());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let mut doc = BrailleDocument::with_text("keep");
        let path = PathBuf::from("/nonexistent/zephyr/missing.brf");
        let err = load_file(&mut doc, &path, BrfReadOptions::default()).unwrap_err();
        assert!(matches!(err, FormatError::NotFound(p) if p == path));
        assert_eq!(doc.text(), "keep");
    }

    #[test]
    fn test_apply_brf_keeps_lines_per_page_without_form_feed() {
        let mut doc = BrailleDocument::new();
        doc.set_layout(Layout::new(40, 30));
        Decoded::Brf(brf::decode(b"abc\ndef", BrfReadOptions::default())).apply_to(&mut doc);
        assert_eq!(doc.layout().lines_per_page, 30);
        assert_eq!(doc.text(), "abc\ndef");
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_apply_bzy_restores_state() {
        let mut doc = BrailleDocument::new();
        let data =
            "CharsPerLine 20\nLinesPerPage 10\nCaretOffset 4\nViewFocus ascii\nHeaderEnd\nabc\u{b6}\ndef";
        Decoded::Bzy(bzy::decode(data.as_bytes()).unwrap()).apply_to(&mut doc);
        assert_eq!(doc.layout(), Layout::new(20, 10));
        assert_eq!(doc.focus(), Projection::Ascii);
        assert_eq!(doc.caret(), 4);
        assert_eq!(doc.text(), format!("abc{}\ndef", PARAGRAPH_END));
    }
}
