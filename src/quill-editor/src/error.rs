//! Error types for the line editor.

use thiserror::Error;

/// Errors surfaced by the editor.
///
/// Editing itself never fails: a full buffer, an inert key or a malformed
/// escape sequence is absorbed silently. Only setup mistakes and I/O on the
/// byte source or sink are reported.
#[derive(Error, Debug)]
pub enum EditorError {
    /// Reading input or writing terminal output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The line capacity is outside the accepted range.
    #[error("invalid line capacity {capacity} (expected {min}..={max})")]
    InvalidCapacity {
        /// Requested capacity in cells.
        capacity: usize,
        /// Smallest accepted capacity.
        min: usize,
        /// Largest accepted capacity.
        max: usize,
    },

    /// The prompt leaves no room for editable text.
    #[error("prompt of {len} cells does not fit a line of {capacity} cells")]
    PromptTooLong {
        /// Prompt length in bytes.
        len: usize,
        /// Line capacity in cells.
        capacity: usize,
    },

    /// The prompt contains a byte that cannot be shown in a single cell.
    #[error("prompt contains non-printable byte 0x{byte:02x}")]
    InvalidPrompt {
        /// The offending byte.
        byte: u8,
    },

    /// `setup` was called on an editor that already has handlers.
    #[error("editor handlers are already installed")]
    AlreadyConfigured,
}

/// Result type alias using [`EditorError`].
pub type Result<T> = std::result::Result<T, EditorError>;
