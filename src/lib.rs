//! Braille Zephyr - braille transcription editing core
//!
//! One text buffer shared by a braille view and an ASCII view, an undo log
//! that stores one self-inverting record per edit, BRF and BZY file codecs,
//! a word-boundary rewrap and typewriter-style margin signals.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod format;
pub mod model;
pub mod tracing;

// Re-export commonly used types
pub use config::ZephyrConfig;
pub use format::{load_file, save_file, FileFormat, FormatError};
pub use model::{BrailleDocument, EditMode, EditRecord, Projection, TextBuffer};
