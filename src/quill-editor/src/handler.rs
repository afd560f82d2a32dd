//! The capability the editor calls with a completed line.

use crate::console::Console;

/// What the session should do after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Keep reading input.
    #[default]
    Continue,
    /// End the session once the line has been reset.
    Exit,
}

/// Receives a completed line from the editor.
///
/// The editor holds two of these, one for submitted lines and one for help
/// requests, plus a `cookie` of type `C` passed to both. The line is the raw
/// editable text; splitting it into tokens is the handler's business.
pub trait LineHandler<C: ?Sized> {
    /// Handles `line`. Output written to `console` appears on its own row.
    fn handle_line(&self, cookie: &mut C, console: &mut Console<'_>, line: &str) -> Flow;
}

/// Why a blocking session loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The byte source reached end-of-stream.
    EndOfInput,
    /// A handler returned [`Flow::Exit`].
    ExitRequested,
}
