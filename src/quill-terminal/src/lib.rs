//! Terminal glue for the quill shell.
//!
//! - [`RawMode`]: raw-mode acquisition that implements the editor's
//!   [`TerminalMode`](quill_editor::TerminalMode) hand-off and restores the
//!   terminal when dropped.
//! - [`install_panic_hook`]: leaves raw mode before a panic message is
//!   printed.

mod panic;
mod raw;

pub use panic::{install_panic_hook, restore_terminal};
pub use raw::{RawMode, is_interactive};
