//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/braille-zephyr/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::format::brf::DEFAULT_SCAN_WINDOW;
use crate::format::BrfReadOptions;
use crate::model::layout::{Layout, DEFAULT_CHARS_PER_LINE, DEFAULT_LINES_PER_PAGE};
use crate::model::signals::MarginBells;

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZephyrConfig {
    /// Cells per line for new documents
    pub chars_per_line: usize,
    /// Lines per page for new documents, 0 for no pages
    pub lines_per_page: usize,
    /// Column of the line margin bell
    pub line_margin_bell: Option<usize>,
    /// Page line of the page margin bell
    pub page_margin_bell: Option<usize>,
    pub line_end_bell: bool,
    /// Bytes of a BRF file searched for the first page break
    pub brf_scan_window: usize,
}

impl Default for ZephyrConfig {
    fn default() -> Self {
        let bells = MarginBells::default();
        Self {
            chars_per_line: DEFAULT_CHARS_PER_LINE,
            lines_per_page: DEFAULT_LINES_PER_PAGE,
            line_margin_bell: bells.line_margin,
            page_margin_bell: bells.page_margin,
            line_end_bell: bells.line_end,
            brf_scan_window: DEFAULT_SCAN_WINDOW,
        }
    }
}

impl ZephyrConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, or return defaults if it is missing or
    /// cannot be parsed
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let dir = crate::config_paths::ensure_config_dir()?;
        self.save_to(&dir.join("config.yaml"))
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.chars_per_line, self.lines_per_page)
    }

    pub fn bells(&self) -> MarginBells {
        MarginBells {
            line_margin: self.line_margin_bell,
            page_margin: self.page_margin_bell,
            line_end: self.line_end_bell,
        }
    }

    pub fn brf_options(&self) -> BrfReadOptions {
        BrfReadOptions {
            scan_window: self.brf_scan_window,
        }
    }
}
