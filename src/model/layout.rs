//! Page layout parameters and the end-of-line convention

pub const DEFAULT_CHARS_PER_LINE: usize = 40;
pub const DEFAULT_LINES_PER_PAGE: usize = 25;

/// Braille page geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Cells per line (positive)
    pub chars_per_line: usize,
    /// Lines per page, 0 disables page boundaries
    pub lines_per_page: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            chars_per_line: DEFAULT_CHARS_PER_LINE,
            lines_per_page: DEFAULT_LINES_PER_PAGE,
        }
    }
}

impl Layout {
    pub fn new(chars_per_line: usize, lines_per_page: usize) -> Self {
        Self {
            chars_per_line,
            lines_per_page,
        }
    }

    /// Whether line `index` starts a new page
    pub fn is_first_line_of_page(&self, index: usize) -> bool {
        self.lines_per_page > 0 && index % self.lines_per_page == 0
    }

    /// Zero-based page holding line `index`, `None` when pages are disabled
    pub fn page_of_line(&self, index: usize) -> Option<usize> {
        (self.lines_per_page > 0).then(|| index / self.lines_per_page)
    }
}

/// Line terminator written between lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    /// The convention of the platform we run on
    pub fn platform() -> Self {
        if cfg!(windows) {
            Self::CrLf
        } else {
            Self::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }

    /// Convention of the first terminator found in `text`, if any
    pub fn detect(text: &str) -> Option<Self> {
        let pos = text.find(|c: char| c == '\n' || c == '\r')?;
        if text[pos..].starts_with("\r\n") {
            Some(Self::CrLf)
        } else {
            Some(Self::Lf)
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::platform()
    }
}

impl std::fmt::Display for LineEnding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lf => write!(f, "LF"),
            Self::CrLf => write!(f, "CRLF"),
        }
    }
}
