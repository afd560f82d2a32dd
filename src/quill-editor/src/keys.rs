//! Editing keys and the raw byte values they are decoded from.
//!
//! The editor works on single-byte, fixed-width cells. Control keys are the
//! classic `byte & 0x1f` mnemonics, and the only multi-byte input understood
//! is the `ESC [ <final>` arrow-key form.

use std::fmt;

/// Escape (0x1b), first byte of a control sequence.
pub const ESCAPE: u8 = 0x1b;

/// Delete (0x7f), sent by most terminals for the Backspace key.
pub const DELETE: u8 = 0x7f;

/// Byte following [`ESCAPE`] that introduces a control sequence (CSI).
pub const CSI_BRACKET: u8 = b'[';

/// Byte that asks for contextual help instead of being inserted.
pub const HELP: u8 = b'?';

/// Returns the control byte for a letter, e.g. `ctrl(b'a') == 0x01`.
#[must_use]
pub const fn ctrl(letter: u8) -> u8 {
    letter & 0x1f
}

/// Returns true if `byte` may be stored in the editable region.
///
/// Only graphic ASCII and the space character qualify.
#[must_use]
pub const fn is_printable(byte: u8) -> bool {
    byte.is_ascii_graphic() || byte == b' '
}

/// Why the current line was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbortReason {
    /// Ctrl-L, a clear-screen request.
    ClearScreen,
    /// Ctrl-C.
    Interrupt,
    /// Ctrl-D.
    EndOfTransmission,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::ClearScreen => write!(f, "clear-screen"),
            AbortReason::Interrupt => write!(f, "interrupt"),
            AbortReason::EndOfTransmission => write!(f, "end-of-transmission"),
        }
    }
}

/// A decoded editing action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Insert a printable byte at the cursor.
    Insert(u8),
    /// Ask for help on the current text.
    Help,
    /// Move the cursor to the start of the editable region (Ctrl-A).
    LineStart,
    /// Move the cursor to the end of the editable region (Ctrl-E).
    LineEnd,
    /// Move the cursor one cell left (Ctrl-B, `ESC [ D`).
    Left,
    /// Move the cursor one cell right (Ctrl-F, `ESC [ C`).
    Right,
    /// Up arrow (`ESC [ A`). Recognized, has no effect.
    Up,
    /// Down arrow (`ESC [ B`). Recognized, has no effect.
    Down,
    /// Erase the character before the cursor (Ctrl-H, DEL).
    ErasePrevious,
    /// Submit the line (Ctrl-M, carriage return).
    Submit,
    /// Abandon the line and start over.
    Abort(AbortReason),
}

impl Key {
    /// Classifies a byte seen outside of an escape sequence.
    ///
    /// Returns `None` for [`ESCAPE`] (the decoder handles it) and for every
    /// byte without a binding.
    #[must_use]
    pub fn from_plain_byte(byte: u8) -> Option<Self> {
        // Checked before the printable range, which also contains '?'.
        if byte == HELP {
            return Some(Key::Help);
        }
        if is_printable(byte) {
            return Some(Key::Insert(byte));
        }

        const CTRL_A: u8 = ctrl(b'a');
        const CTRL_B: u8 = ctrl(b'b');
        const CTRL_C: u8 = ctrl(b'c');
        const CTRL_D: u8 = ctrl(b'd');
        const CTRL_E: u8 = ctrl(b'e');
        const CTRL_F: u8 = ctrl(b'f');
        const CTRL_H: u8 = ctrl(b'h');
        const CTRL_L: u8 = ctrl(b'l');
        const CTRL_M: u8 = ctrl(b'm');

        match byte {
            CTRL_A => Some(Key::LineStart),
            CTRL_B => Some(Key::Left),
            CTRL_C => Some(Key::Abort(AbortReason::Interrupt)),
            CTRL_D => Some(Key::Abort(AbortReason::EndOfTransmission)),
            CTRL_E => Some(Key::LineEnd),
            CTRL_F => Some(Key::Right),
            CTRL_H | DELETE => Some(Key::ErasePrevious),
            CTRL_L => Some(Key::Abort(AbortReason::ClearScreen)),
            CTRL_M => Some(Key::Submit),
            _ => None,
        }
    }

    /// Classifies the final byte of an `ESC [` sequence.
    #[must_use]
    pub fn from_csi_final(byte: u8) -> Option<Self> {
        match byte {
            b'A' => Some(Key::Up),
            b'B' => Some(Key::Down),
            b'C' => Some(Key::Right),
            b'D' => Some(Key::Left),
            _ => None,
        }
    }

    /// Returns the normalized name for this key.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Key::Insert(byte) => format!("insert({})", char::from(*byte)),
            Key::Help => "help".to_string(),
            Key::LineStart => "line-start".to_string(),
            Key::LineEnd => "line-end".to_string(),
            Key::Left => "left".to_string(),
            Key::Right => "right".to_string(),
            Key::Up => "up".to_string(),
            Key::Down => "down".to_string(),
            Key::ErasePrevious => "erase-previous".to_string(),
            Key::Submit => "submit".to_string(),
            Key::Abort(reason) => format!("abort({reason})"),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
