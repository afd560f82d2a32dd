//! Terminal mode hand-off around line handlers.
//!
//! While the editor is reading keys the terminal is in raw mode. A handler
//! may block, prompt, or print freely, so the editor gives the terminal back
//! for the duration of the call and takes it again afterwards.

use std::io;

use tracing::warn;

/// Control over the terminal's input mode.
///
/// Implemented by the host (see `quill-terminal`); the editor itself never
/// touches terminal attributes.
pub trait TerminalMode {
    /// Leaves raw mode so a handler can use the terminal normally.
    fn suspend(&mut self) -> io::Result<()>;

    /// Re-enters raw mode after a handler returns.
    fn resume(&mut self) -> io::Result<()>;
}

/// A RAII guard that keeps the terminal suspended while it lives.
///
/// The mode is resumed when the guard is dropped, which also happens while
/// unwinding out of a panicking handler.
pub struct ModeSuspension<'m, 'a> {
    mode: Option<&'m mut (dyn TerminalMode + 'a)>,
}

impl<'m, 'a> ModeSuspension<'m, 'a> {
    /// Suspends `mode`, if there is one.
    ///
    /// A failed suspend is logged and the handler still runs; resume is
    /// attempted on drop regardless.
    pub fn new(mode: Option<&'m mut (dyn TerminalMode + 'a)>) -> Self {
        let mut mode = mode;
        if let Some(mode) = mode.as_deref_mut() {
            if let Err(err) = mode.suspend() {
                warn!(error = %err, "failed to leave raw mode before handler");
            }
        }
        Self { mode }
    }
}

impl Drop for ModeSuspension<'_, '_> {
    fn drop(&mut self) {
        if let Some(mode) = self.mode.as_deref_mut() {
            if let Err(err) = mode.resume() {
                warn!(error = %err, "failed to re-enter raw mode after handler");
            }
        }
    }
}
