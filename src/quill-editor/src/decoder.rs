//! Byte-at-a-time decoder for plain keys and `ESC [` arrow sequences.
//!
//! The decoder is single-step: after `ESC [` exactly one more
//! byte is consumed as the final byte, whatever it is. Parameterized
//! sequences such as `ESC [ 3 ~` therefore end at the `3`, and the `~` that
//! follows is decoded as ordinary input.

use crate::keys::{CSI_BRACKET, ESCAPE, Key};

/// Where the decoder is within an escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecodeState {
    /// Not inside an escape sequence.
    #[default]
    Plain,
    /// Saw `ESC`.
    Escape,
    /// Saw `ESC [`; the next byte is the final byte.
    EscapeBracket,
}

/// Turns raw input bytes into [`Key`]s, carrying escape state across calls.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    state: DecodeState,
}

impl Decoder {
    /// Creates a decoder in the [`DecodeState::Plain`] state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current decode state.
    #[must_use]
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Returns to [`DecodeState::Plain`], dropping any partial sequence.
    pub fn reset(&mut self) {
        self.state = DecodeState::Plain;
    }

    /// Consumes one byte.
    ///
    /// Returns the key it completes, or `None` if the byte was absorbed
    /// (sequence prefix, malformed sequence, unbound byte).
    pub fn decode(&mut self, byte: u8) -> Option<Key> {
        match self.state {
            DecodeState::Plain => {
                if byte == ESCAPE {
                    self.state = DecodeState::Escape;
                    return None;
                }
                Key::from_plain_byte(byte)
            }
            DecodeState::Escape => {
                self.state = if byte == CSI_BRACKET {
                    DecodeState::EscapeBracket
                } else {
                    DecodeState::Plain
                };
                None
            }
            DecodeState::EscapeBracket => {
                self.state = DecodeState::Plain;
                Key::from_csi_final(byte)
            }
        }
    }
}
