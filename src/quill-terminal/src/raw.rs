//! Raw mode over crossterm.

use std::io::{self, IsTerminal};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode, is_raw_mode_enabled};
use quill_editor::TerminalMode;
use tracing::{debug, warn};

/// Returns true when stdin is attached to a terminal.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal()
}

/// Holds the terminal in raw mode.
///
/// Dropping it puts the terminal back the way [`RawMode::enter`] found it.
/// As a [`TerminalMode`] it can also be handed to the editor, which
/// suspends it around line handlers.
#[derive(Debug)]
pub struct RawMode {
    /// Whether raw mode was already enabled when we entered.
    was_enabled: bool,
    /// Whether raw mode is currently on.
    active: bool,
}

impl RawMode {
    /// Enters raw mode.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin is not a terminal or raw mode cannot be
    /// enabled.
    pub fn enter() -> io::Result<Self> {
        let was_enabled = is_raw_mode_enabled().unwrap_or(false);
        if !was_enabled {
            enable_raw_mode()?;
        }
        debug!(was_enabled, "raw mode entered");
        Ok(Self {
            was_enabled,
            active: true,
        })
    }

    /// Returns true while raw mode is on.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true if raw mode was already enabled before [`RawMode::enter`].
    #[must_use]
    pub fn was_raw_mode_enabled(&self) -> bool {
        self.was_enabled
    }
}

impl TerminalMode for RawMode {
    fn suspend(&mut self) -> io::Result<()> {
        if self.active {
            disable_raw_mode()?;
            self.active = false;
        }
        Ok(())
    }

    fn resume(&mut self) -> io::Result<()> {
        if !self.active {
            enable_raw_mode()?;
            self.active = true;
        }
        Ok(())
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let result = match (self.active, self.was_enabled) {
            (true, false) => disable_raw_mode(),
            (false, true) => enable_raw_mode(),
            _ => Ok(()),
        };
        match result {
            Ok(()) => debug!("terminal mode restored"),
            Err(err) => warn!(error = %err, "failed to restore terminal mode"),
        }
    }
}
