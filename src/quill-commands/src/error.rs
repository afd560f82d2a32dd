//! Error types for command execution and dispatch.

use std::io;

use thiserror::Error;

/// Error returned by a leaf command's action.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The command ran and failed.
    #[error("{0}")]
    Failed(String),

    /// The arguments were not acceptable.
    #[error("usage: {0}")]
    Usage(String),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for leaf command actions.
pub type CommandResult = Result<(), CommandError>;

/// Error from walking the command table.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A token matched nothing in the current table.
    #[error("unknown command `{token}`")]
    Unknown {
        /// The unmatched token.
        token: String,
    },

    /// The tokens ran out before reaching a leaf.
    #[error("incomplete command{}", describe_path(.path))]
    Incomplete {
        /// The commands matched so far, space separated.
        path: String,
    },

    /// A matched entry has neither an action nor subcommands.
    #[error("invalid command table entry `{path}`")]
    InvalidEntry {
        /// Path to the entry, space separated.
        path: String,
    },

    /// The leaf ran and returned an error.
    #[error("{path}: {source}")]
    Command {
        /// Path to the leaf, space separated.
        path: String,
        /// The leaf's error.
        #[source]
        source: CommandError,
    },

    /// Writing help or report output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn describe_path(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" `{path}`")
    }
}
