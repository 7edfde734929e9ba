//! Command-line argument parsing
//!
//! Supports:
//! - Describing a document (layout, line ending, paragraph ends)
//! - Converting between BRF and BZY
//! - Re-flowing long lines from a given line

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Braille document tools
#[derive(Parser, Debug)]
#[command(name = "zephyr", version, about = "Braille document tools")]
pub struct CliArgs {
    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Describe a BRF or BZY file
    Info {
        file: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a document, the output extension picks the format
    Convert { input: PathBuf, output: PathBuf },

    /// Re-flow lines longer than the line length
    Rewrap {
        file: PathBuf,

        /// Start at line N
        #[arg(long, value_name = "N")]
        from_line: Option<usize>,

        /// Override the line length
        #[arg(long, value_name = "N")]
        chars_per_line: Option<usize>,

        /// Write here instead of in place
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// A validated command ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Info {
        file: PathBuf,
        json: bool,
    },
    Convert {
        input: PathBuf,
        output: PathBuf,
    },
    Rewrap {
        file: PathBuf,
        /// 0-indexed
        start_line: usize,
        chars_per_line: Option<usize>,
        output: PathBuf,
    },
}

impl CliArgs {
    /// Validate the parsed arguments
    pub fn into_command(self) -> Result<Command, String> {
        match self.command {
            CliCommand::Info { file, json } => Ok(Command::Info { file, json }),
            CliCommand::Convert { input, output } => {
                if input == output {
                    return Err("Input and output are the same file".to_string());
                }
                Ok(Command::Convert { input, output })
            }
            CliCommand::Rewrap {
                file,
                from_line,
                chars_per_line,
                output,
            } => {
                if chars_per_line == Some(0) {
                    return Err("Line length must be at least 1".to_string());
                }
                // Convert from 1-indexed (user input) to 0-indexed (internal)
                let start_line = match from_line {
                    Some(0) => return Err("Line numbers start at 1".to_string()),
                    Some(line) => line - 1,
                    None => 0,
                };
                let output = output.unwrap_or_else(|| file.clone());
                Ok(Command::Rewrap {
                    file,
                    start_line,
                    chars_per_line,
                    output,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("zephyr").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_info() {
        let command = parse(&["info", "book.brf", "--json"]).into_command().unwrap();
        assert_eq!(
            command,
            Command::Info {
                file: PathBuf::from("book.brf"),
                json: true
            }
        );
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let args = parse(&["info", "book.brf", "--config", "alt.yaml"]);
        assert_eq!(args.config, Some(PathBuf::from("alt.yaml")));
    }

    #[test]
    fn test_verbose_counts() {
        assert_eq!(parse(&["info", "a.brf"]).verbose, 0);
        assert_eq!(parse(&["-vv", "info", "a.brf"]).verbose, 2);
        assert_eq!(parse(&["info", "a.brf", "-v"]).verbose, 1);
    }

    #[test]
    fn test_convert_to_same_file_rejected() {
        let args = parse(&["convert", "a.brf", "a.brf"]);
        assert!(args.into_command().is_err());
    }

    #[test]
    fn test_rewrap_line_conversion() {
        let command = parse(&["rewrap", "a.bzy", "--from-line", "42"])
            .into_command()
            .unwrap();
        // 1-indexed to 0-indexed: line 42 → 41, in place by default
        assert_eq!(
            command,
            Command::Rewrap {
                file: PathBuf::from("a.bzy"),
                start_line: 41,
                chars_per_line: None,
                output: PathBuf::from("a.bzy"),
            }
        );
    }

    #[test]
    fn test_rewrap_rejects_line_zero() {
        let args = parse(&["rewrap", "a.bzy", "--from-line", "0"]);
        assert!(args.into_command().is_err());
    }

    #[test]
    fn test_rewrap_output_and_length() {
        let command = parse(&["rewrap", "a.brf", "--chars-per-line", "32", "-o", "b.brf"])
            .into_command()
            .unwrap();
        let Command::Rewrap {
            chars_per_line,
            output,
            ..
        } = command
        else {
            panic!("Expected Rewrap");
        };
        assert_eq!(chars_per_line, Some(32));
        assert_eq!(output, PathBuf::from("b.brf"));
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(CliArgs::try_parse_from(["zephyr"]).is_err());
    }
}
