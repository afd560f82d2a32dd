//! Command-line arguments for the `quill` binary.

use std::fmt;
use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

/// Log verbosity level.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors (default)
    #[default]
    Warn,
    /// Show informational messages, warnings, and errors
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including per-byte decoding
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// quill - interactive command shell
///
/// Reads keystrokes from stdin, edits one line at a time, and runs the
/// line against a tree of commands. Press `?` for help on the current line.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "quill", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (default: <config dir>/quill/config.toml)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Prompt shown before the line
    #[arg(long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Line width in cells, prompt included
    #[arg(long, value_name = "CELLS")]
    pub width: Option<usize>,

    /// Set log verbosity level
    #[arg(long = "log-level", short = 'L', value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Enable verbose output (same as --log-level debug)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Leave the terminal in its current mode instead of raw mode
    #[arg(long)]
    pub no_raw: bool,
}
