//! Terminal output: redraw sequences and the console handed to handlers.

use std::io::{self, Write};

use crate::buffer::LineBuffer;

/// Carriage return followed by "erase to end of line".
pub(crate) const ERASE_LINE: &[u8] = b"\r\x1b[K";
/// One cell left (`ESC [ D`).
pub(crate) const CURSOR_LEFT: &[u8] = b"\x1b[D";
/// One cell right (`ESC [ C`).
pub(crate) const CURSOR_RIGHT: &[u8] = b"\x1b[C";
/// Back, space, back: blanks the cell before the cursor.
pub(crate) const RUBOUT: &[u8] = b"\x08 \x08";
/// Ends the visible row.
pub(crate) const NEWLINE: &[u8] = b"\r\n";

const BACKSPACE: u8 = 0x08;

/// Rewrites the whole visible line and puts the terminal cursor back on
/// the editing caret.
pub(crate) fn write_redraw(out: &mut dyn Write, line: &LineBuffer) -> io::Result<()> {
    out.write_all(ERASE_LINE)?;
    out.write_all(line.visible())?;
    for _ in line.cursor()..line.end() {
        out.write_all(&[BACKSPACE])?;
    }
    Ok(())
}

/// Replaces the visible line with `text`, then redraws the line below it.
///
/// A trailing newline is added when `text` lacks one, otherwise the redraw
/// would erase the message again.
pub(crate) fn write_message(out: &mut dyn Write, line: &LineBuffer, text: &str) -> io::Result<()> {
    out.write_all(ERASE_LINE)?;
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        out.write_all(NEWLINE)?;
    }
    write_redraw(out, line)
}

/// The editor's output as seen by a running line handler.
///
/// Writes go straight to the editor's sink. [`Console::message`] interleaves
/// a message with the line that was being edited.
pub struct Console<'e> {
    out: &'e mut dyn Write,
    line: &'e LineBuffer,
}

impl<'e> Console<'e> {
    /// Creates a console over `out` for the given line.
    pub fn new(out: &'e mut dyn Write, line: &'e LineBuffer) -> Self {
        Self { out, line }
    }

    /// The editable text of the line the handler was invoked for.
    #[must_use]
    pub fn line(&self) -> &str {
        self.line.text()
    }

    /// Erases the current row, writes `text`, and redraws the line.
    pub fn message(&mut self, text: &str) -> io::Result<()> {
        write_message(self.out, self.line, text)
    }
}

impl Write for Console<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
