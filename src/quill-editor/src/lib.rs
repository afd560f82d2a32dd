//! Interactive single-line editor for quill.
//!
//! The editor consumes raw terminal bytes one at a time, keeps a
//! fixed-capacity line (prompt followed by editable text) and mirrors every
//! edit on an output sink with ANSI sequences. Completed lines and help
//! requests are handed to [`LineHandler`]s installed with
//! [`Editor::setup`].
//!
//! # Keys
//!
//! | Input            | Effect                                   |
//! |------------------|------------------------------------------|
//! | printable ASCII  | insert at cursor                         |
//! | `?`              | help on the current text                 |
//! | Ctrl-A / Ctrl-E  | start / end of line                      |
//! | Ctrl-B / Ctrl-F  | one cell left / right                    |
//! | `ESC [ D/C`      | one cell left / right                    |
//! | `ESC [ A/B`      | recognized, no effect                    |
//! | Ctrl-H, DEL      | erase before cursor                      |
//! | Ctrl-M           | submit                                   |
//! | Ctrl-C/D/L       | abandon the line                         |
//!
//! The editor never touches terminal attributes itself. Hosts that run it
//! on a raw-mode terminal supply a [`TerminalMode`] so the terminal is
//! handed back while handlers run.

#![warn(missing_docs)]

pub mod buffer;
pub mod console;
pub mod decoder;
pub mod editor;
pub mod error;
pub mod handler;
pub mod keys;
pub mod mode;

pub use buffer::{DEFAULT_CAPACITY, LineBuffer, MAX_CAPACITY, MIN_CAPACITY};
pub use console::Console;
pub use decoder::{DecodeState, Decoder};
pub use editor::{Editor, EditorConfig};
pub use error::{EditorError, Result};
pub use handler::{Flow, LineHandler, SessionEnd};
pub use keys::{AbortReason, Key};
pub use mode::{ModeSuspension, TerminalMode};
