//! Running command-line commands against documents

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::cli::Command;
use crate::config::ZephyrConfig;
use crate::format::{self, FileFormat};
use crate::model::{rewrap_from, BrailleDocument, Layout};

/// Summary printed by `zephyr info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    pub file: PathBuf,
    pub format: &'static str,
    pub lines: usize,
    pub chars: usize,
    pub chars_per_line: usize,
    pub lines_per_page: usize,
    pub pages: usize,
    pub line_ending: String,
    pub caret: usize,
    pub focus: &'static str,
    /// 1-indexed lines ending a paragraph
    pub paragraph_end_lines: Vec<usize>,
    /// 1-indexed lines longer than `chars_per_line`
    pub long_lines: Vec<usize>,
}

impl DocumentInfo {
    pub fn describe(doc: &BrailleDocument, file: &Path, format: FileFormat) -> Self {
        let buffer = doc.buffer();
        let layout = doc.layout();
        let lines = buffer.line_count();
        Self {
            file: file.to_path_buf(),
            format: format.name(),
            lines,
            chars: buffer.char_count(),
            chars_per_line: layout.chars_per_line,
            lines_per_page: layout.lines_per_page,
            pages: layout
                .page_of_line(lines - 1)
                .map_or(1, |last_page| last_page + 1),
            line_ending: doc.line_ending().to_string(),
            caret: doc.caret(),
            focus: doc.focus().as_str(),
            paragraph_end_lines: doc.paragraph_ends().into_iter().map(|i| i + 1).collect(),
            long_lines: (0..lines)
                .filter(|&i| buffer.line_length(i) > layout.chars_per_line)
                .map(|i| i + 1)
                .collect(),
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("file:           {}\n", self.file.display()));
        out.push_str(&format!("format:         {}\n", self.format));
        out.push_str(&format!("lines:          {}\n", self.lines));
        out.push_str(&format!("characters:     {}\n", self.chars));
        out.push_str(&format!(
            "layout:         {} cells x {} lines ({} pages)\n",
            self.chars_per_line, self.lines_per_page, self.pages
        ));
        out.push_str(&format!("line ending:    {}\n", self.line_ending));
        out.push_str(&format!("caret:          {} ({} view)\n", self.caret, self.focus));
        out.push_str(&format!(
            "paragraph ends: {}\n",
            join_lines(&self.paragraph_end_lines)
        ));
        out.push_str(&format!("long lines:     {}", join_lines(&self.long_lines)));
        out
    }
}

fn join_lines(lines: &[usize]) -> String {
    if lines.is_empty() {
        return "none".to_string();
    }
    lines
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Open `path` with the configured layout and bells
pub fn open_document(path: &Path, config: &ZephyrConfig) -> Result<(BrailleDocument, FileFormat)> {
    let mut doc = BrailleDocument::with_settings(config.layout(), config.bells());
    let format = format::load_file(&mut doc, path, config.brf_options())
        .with_context(|| format!("Failed to open {}", path.display()))?;
    Ok((doc, format))
}

/// Run `command`, returning what to print
pub fn run(command: Command, config: &ZephyrConfig) -> Result<String> {
    match command {
        Command::Info { file, json } => {
            let (doc, format) = open_document(&file, config)?;
            let info = DocumentInfo::describe(&doc, &file, format);
            if json {
                Ok(serde_json::to_string_pretty(&info)?)
            } else {
                Ok(info.render())
            }
        }
        Command::Convert { input, output } => {
            let (mut doc, from) = open_document(&input, config)?;
            let to = format::save_file(&mut doc, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            Ok(format!(
                "Converted {} ({}) to {} ({})",
                input.display(),
                from.name(),
                output.display(),
                to.name()
            ))
        }
        Command::Rewrap {
            file,
            start_line,
            chars_per_line,
            output,
        } => {
            let (mut doc, _) = open_document(&file, config)?;
            if let Some(chars_per_line) = chars_per_line {
                doc.set_layout(Layout {
                    chars_per_line,
                    ..doc.layout()
                });
            }
            let line_count = doc.buffer().line_count();
            if start_line >= line_count {
                bail!(
                    "Line {} is past the end of {} ({} lines)",
                    start_line + 1,
                    file.display(),
                    line_count
                );
            }

            let report = rewrap_from(&mut doc, start_line);
            if !report.unwrappable.is_empty() {
                tracing::warn!(lines = ?report.unwrappable, "some lines could not be wrapped");
            }
            format::save_file(&mut doc, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            Ok(format!(
                "Wrapped {} lines, {} left over-length, wrote {}",
                report.lines_wrapped,
                report.unwrappable.len(),
                output.display()
            ))
        }
    }
}
