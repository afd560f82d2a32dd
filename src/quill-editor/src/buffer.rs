//! Fixed-capacity line buffer holding the prompt followed by editable text.
//!
//! Layout of a line with capacity `N`:
//!
//! ```text
//! [ prompt ........ | editable text ..... | 0 | unused ... ]
//!   0               start                 end             N
//! ```
//!
//! The slot at `end` always holds a NUL terminator, so `end <= N - 1`, and
//! an insertion needs `end + 1 < N`. The buffer never reallocates.

use crate::error::{EditorError, Result};
use crate::keys::is_printable;

/// Smallest capacity that holds a terminator and one editable cell.
pub const MIN_CAPACITY: usize = 2;

/// Largest accepted capacity.
pub const MAX_CAPACITY: usize = 4096;

/// Default line width in cells.
pub const DEFAULT_CAPACITY: usize = 80;

/// How an insertion changed the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The byte was appended at the end; echoing it is enough.
    Appended,
    /// The byte went before existing text; the line must be redrawn.
    Inserted,
}

/// How an erase changed the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The last character was removed; "back, space, back" is enough.
    Trailing,
    /// A character before existing text was removed; redraw needed.
    Inner,
}

/// The prompt plus the line being edited, with the cursor position.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    prompt: Box<[u8]>,
    line: Box<[u8]>,
    start: usize,
    end: usize,
    cursor: usize,
}

impl LineBuffer {
    /// Creates a buffer of `capacity` cells starting with `prompt`.
    ///
    /// The prompt must consist of printable bytes and leave at least one
    /// editable cell.
    pub fn new(prompt: &str, capacity: usize) -> Result<Self> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) {
            return Err(EditorError::InvalidCapacity {
                capacity,
                min: MIN_CAPACITY,
                max: MAX_CAPACITY,
            });
        }
        if let Some(&byte) = prompt.as_bytes().iter().find(|&&b| !is_printable(b)) {
            return Err(EditorError::InvalidPrompt { byte });
        }
        if prompt.len() + 1 >= capacity {
            return Err(EditorError::PromptTooLong {
                len: prompt.len(),
                capacity,
            });
        }

        let mut buffer = Self {
            prompt: prompt.as_bytes().into(),
            line: vec![0u8; capacity].into_boxed_slice(),
            start: prompt.len(),
            end: prompt.len(),
            cursor: prompt.len(),
        };
        buffer.reset();
        Ok(buffer)
    }

    /// Restores the line to just the prompt, with the cursor after it.
    pub fn reset(&mut self) {
        self.line.fill(0);
        self.line[..self.start].copy_from_slice(&self.prompt);
        self.end = self.start;
        self.cursor = self.start;
    }

    /// Total capacity in cells, including the terminator slot.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.line.len()
    }

    /// The prompt bytes.
    #[must_use]
    pub fn prompt(&self) -> &[u8] {
        &self.prompt
    }

    /// Offset where editable text begins (the prompt length).
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset one past the last editable character.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Offset of the editing caret.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns true if the editable text is empty or only spaces.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text_bytes().iter().all(|&b| b == b' ')
    }

    /// Returns true if another byte cannot be inserted.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.end + 1 >= self.capacity()
    }

    /// The visible line: prompt followed by the editable text.
    #[must_use]
    pub fn visible(&self) -> &[u8] {
        &self.line[..self.end]
    }

    /// The whole backing storage, terminator and unused tail included.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.line
    }

    /// The editable text as bytes.
    #[must_use]
    pub fn text_bytes(&self) -> &[u8] {
        &self.line[self.start..self.end]
    }

    /// The editable text.
    ///
    /// Only printable ASCII is ever stored, so this is always valid UTF-8.
    #[must_use]
    pub fn text(&self) -> &str {
        std::str::from_utf8(self.text_bytes()).unwrap_or_default()
    }

    /// Inserts `byte` at the cursor and advances the cursor.
    ///
    /// Returns `None` without touching the line when it is full or the byte
    /// is not printable.
    pub fn insert(&mut self, byte: u8) -> Option<Insertion> {
        if !is_printable(byte) || self.is_full() {
            return None;
        }

        let at = self.cursor;
        let appended = at == self.end;
        self.line.copy_within(at..self.end, at + 1);
        self.line[at] = byte;
        self.end += 1;
        self.line[self.end] = 0;
        self.cursor += 1;

        Some(if appended {
            Insertion::Appended
        } else {
            Insertion::Inserted
        })
    }

    /// Removes the character before the cursor and moves the cursor back.
    ///
    /// Returns `None` when the cursor is at the start of the editable region.
    pub fn erase_previous(&mut self) -> Option<Removal> {
        if self.cursor <= self.start {
            return None;
        }

        let at = self.cursor - 1;
        let trailing = at + 1 == self.end;
        self.line.copy_within(at + 1..self.end, at);
        self.end -= 1;
        self.line[self.end] = 0;
        self.cursor -= 1;

        Some(if trailing {
            Removal::Trailing
        } else {
            Removal::Inner
        })
    }

    /// Moves the cursor one cell left. Returns false at the start.
    pub fn move_left(&mut self) -> bool {
        if self.cursor > self.start {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Moves the cursor one cell right. Returns false at the end.
    pub fn move_right(&mut self) -> bool {
        if self.cursor < self.end {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Moves the cursor to the start of the editable region.
    pub fn move_to_start(&mut self) {
        self.cursor = self.start;
    }

    /// Moves the cursor to the end of the editable region.
    pub fn move_to_end(&mut self) {
        self.cursor = self.end;
    }
}
