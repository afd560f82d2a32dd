//! The line editor: decodes input bytes, edits the line, keeps the terminal
//! in sync, and hands completed lines to the installed handlers.

use std::fmt;
use std::io::{self, Read, Write};

use tracing::{debug, trace};

use crate::buffer::{DEFAULT_CAPACITY, Insertion, LineBuffer, Removal};
use crate::console::{self, CURSOR_LEFT, CURSOR_RIGHT, Console, NEWLINE, RUBOUT};
use crate::decoder::{DecodeState, Decoder};
use crate::error::{EditorError, Result};
use crate::handler::{Flow, LineHandler, SessionEnd};
use crate::keys::Key;
use crate::mode::{ModeSuspension, TerminalMode};

/// Editor configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Line capacity in cells, prompt and terminator slot included.
    pub line_width: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_CAPACITY,
        }
    }
}

impl EditorConfig {
    /// Sets the line width.
    #[must_use]
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }
}

/// Handlers and context installed by [`Editor::setup`].
struct Binding<'a, C: ?Sized> {
    cookie: &'a mut C,
    exec: &'a dyn LineHandler<C>,
    help: &'a dyn LineHandler<C>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandlerKind {
    Exec,
    Help,
}

/// An interactive single-line editor over a byte sink.
///
/// Input arrives one byte at a time through [`Editor::feed`] (or the
/// blocking [`Editor::run`] loop). Every edit is reflected on the sink `W`
/// with the shortest sequence that keeps the terminal in step: a plain echo
/// for appends, "back, space, back" for trailing erases, single cursor moves
/// for arrows, and a full [`Editor::redraw`] otherwise.
///
/// # Example
///
/// ```
/// use quill_editor::{Console, Editor, EditorConfig, Flow, LineHandler};
///
/// struct Collect;
///
/// impl LineHandler<Vec<String>> for Collect {
///     fn handle_line(&self, lines: &mut Vec<String>, _: &mut Console<'_>, line: &str) -> Flow {
///         lines.push(line.to_string());
///         Flow::Continue
///     }
/// }
///
/// let mut lines = Vec::new();
/// let mut editor = Editor::new(Vec::new(), EditorConfig::default()).unwrap();
/// editor.setup("> ", &mut lines, &Collect, &Collect).unwrap();
/// editor.run(&b"status\r"[..]).unwrap();
/// drop(editor);
/// assert_eq!(lines, vec!["status".to_string()]);
/// ```
pub struct Editor<'a, W: Write, C: ?Sized = ()> {
    out: W,
    line: LineBuffer,
    decoder: Decoder,
    binding: Option<Binding<'a, C>>,
    mode: Option<Box<dyn TerminalMode + 'a>>,
}

impl<W: Write + fmt::Debug, C: ?Sized> fmt::Debug for Editor<'_, W, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("out", &self.out)
            .field("line", &self.line)
            .field("decoder", &self.decoder)
            .field("binding", &self.binding.as_ref().map(|_| "<handlers>"))
            .field("mode", &self.mode.as_ref().map(|_| "<terminal mode>"))
            .finish()
    }
}

impl<'a, W: Write, C: ?Sized> Editor<'a, W, C> {
    /// Creates an editor writing to `out`, with an empty prompt and no
    /// handlers.
    pub fn new(out: W, config: EditorConfig) -> Result<Self> {
        Ok(Self {
            out,
            line: LineBuffer::new("", config.line_width)?,
            decoder: Decoder::new(),
            binding: None,
            mode: None,
        })
    }

    /// Attaches the terminal mode to hand over while handlers run.
    #[must_use]
    pub fn with_terminal_mode(mut self, mode: Box<dyn TerminalMode + 'a>) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Installs the prompt, the handler context and both handlers, and
    /// resets the line to the new prompt.
    ///
    /// # Errors
    ///
    /// Fails with [`EditorError::AlreadyConfigured`] on a second call, or if
    /// the prompt does not fit the line.
    pub fn setup(
        &mut self,
        prompt: &str,
        cookie: &'a mut C,
        exec: &'a dyn LineHandler<C>,
        help: &'a dyn LineHandler<C>,
    ) -> Result<()> {
        if self.binding.is_some() {
            return Err(EditorError::AlreadyConfigured);
        }

        self.line = LineBuffer::new(prompt, self.line.capacity())?;
        self.decoder.reset();
        self.binding = Some(Binding { cookie, exec, help });
        debug!(prompt, capacity = self.line.capacity(), "editor configured");
        Ok(())
    }

    /// Consumes one input byte.
    ///
    /// Editing never fails; the only errors are I/O errors on the sink. The
    /// returned [`Flow`] is [`Flow::Exit`] when a handler asked to end the
    /// session.
    pub fn feed(&mut self, byte: u8) -> Result<Flow> {
        let Some(key) = self.decoder.decode(byte) else {
            trace!(byte, state = ?self.decoder.state(), "byte absorbed");
            return Ok(Flow::Continue);
        };
        trace!(byte, %key, "decoded key");

        let flow = self.apply(key)?;
        self.out.flush()?;
        Ok(flow)
    }

    /// Feeds bytes from `input` until end-of-stream or until a handler
    /// returns [`Flow::Exit`].
    ///
    /// The line is drawn once before the first byte is read.
    pub fn run<R: Read>(&mut self, input: R) -> Result<SessionEnd> {
        self.redraw()?;

        for byte in input.bytes() {
            let byte = match byte {
                Ok(byte) => byte,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };

            if self.feed(byte)? == Flow::Exit {
                debug!("session ended by handler");
                return Ok(SessionEnd::ExitRequested);
            }
        }

        debug!("input reached end of stream");
        Ok(SessionEnd::EndOfInput)
    }

    /// Rewrites the prompt and text and moves the terminal cursor back onto
    /// the editing caret.
    pub fn redraw(&mut self) -> Result<()> {
        console::write_redraw(&mut self.out, &self.line)?;
        self.out.flush()?;
        Ok(())
    }

    /// Shows `text` in place of the current row, then redraws the line
    /// beneath it without disturbing the edit in progress.
    pub fn message(&mut self, text: &str) -> Result<()> {
        console::write_message(&mut self.out, &self.line, text)?;
        self.out.flush()?;
        Ok(())
    }

    /// Drops any partial escape sequence and restores the line to the bare
    /// prompt. Nothing is drawn.
    pub fn reset(&mut self) {
        self.decoder.reset();
        self.line.reset();
    }

    /// The prompt.
    #[must_use]
    pub fn prompt(&self) -> &str {
        std::str::from_utf8(self.line.prompt()).unwrap_or_default()
    }

    /// The line buffer.
    #[must_use]
    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    /// The editable text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.line.text()
    }

    /// Offset where editable text begins.
    #[must_use]
    pub fn start(&self) -> usize {
        self.line.start()
    }

    /// Offset one past the last editable character.
    #[must_use]
    pub fn end(&self) -> usize {
        self.line.end()
    }

    /// Offset of the editing caret.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.line.cursor()
    }

    /// Line capacity in cells.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.line.capacity()
    }

    /// Current escape decoding state.
    #[must_use]
    pub fn state(&self) -> DecodeState {
        self.decoder.state()
    }

    /// The handler context, if installed.
    #[must_use]
    pub fn cookie(&self) -> Option<&C> {
        self.binding.as_ref().map(|binding| &*binding.cookie)
    }

    /// The output sink.
    #[must_use]
    pub fn output(&self) -> &W {
        &self.out
    }

    /// The output sink, mutably.
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Consumes the editor, returning the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    fn apply(&mut self, key: Key) -> Result<Flow> {
        match key {
            Key::Insert(byte) => match self.line.insert(byte) {
                Some(Insertion::Appended) => self.out.write_all(&[byte])?,
                Some(Insertion::Inserted) => self.redraw()?,
                None => trace!(byte, "line full, byte dropped"),
            },
            Key::Help => {
                let flow = self.invoke(HandlerKind::Help)?;
                if flow == Flow::Exit {
                    self.reset();
                    return Ok(Flow::Exit);
                }
                self.redraw()?;
            }
            Key::LineStart => {
                self.line.move_to_start();
                self.redraw()?;
            }
            Key::LineEnd => {
                self.line.move_to_end();
                self.redraw()?;
            }
            Key::Left => {
                if self.line.move_left() {
                    self.out.write_all(CURSOR_LEFT)?;
                }
            }
            Key::Right => {
                if self.line.move_right() {
                    self.out.write_all(CURSOR_RIGHT)?;
                }
            }
            // No history to recall.
            Key::Up | Key::Down => {}
            Key::ErasePrevious => match self.line.erase_previous() {
                Some(Removal::Trailing) => self.out.write_all(RUBOUT)?,
                Some(Removal::Inner) => self.redraw()?,
                None => {}
            },
            Key::Submit => return self.submit(),
            Key::Abort(reason) => {
                debug!(%reason, "line aborted");
                self.out.write_all(NEWLINE)?;
                self.reset();
                self.redraw()?;
            }
        }
        Ok(Flow::Continue)
    }

    fn submit(&mut self) -> Result<Flow> {
        if self.line.is_blank() {
            self.out.write_all(NEWLINE)?;
            self.reset();
            self.redraw()?;
            return Ok(Flow::Continue);
        }

        let flow = self.invoke(HandlerKind::Exec)?;
        self.reset();
        if flow == Flow::Continue {
            self.redraw()?;
        }
        Ok(flow)
    }

    /// Runs a handler on the current text with the terminal handed over.
    fn invoke(&mut self, kind: HandlerKind) -> Result<Flow> {
        let Some(binding) = self.binding.as_mut() else {
            debug!(?kind, "no handler installed");
            return Ok(Flow::Continue);
        };
        let handler = match kind {
            HandlerKind::Exec => binding.exec,
            HandlerKind::Help => binding.help,
        };
        let text = self.line.text().to_owned();
        debug!(?kind, line = %text, "invoking line handler");

        self.out.write_all(NEWLINE)?;
        self.out.flush()?;

        let flow = {
            let _suspended = ModeSuspension::new(self.mode.as_deref_mut());
            let mut console = Console::new(&mut self.out, &self.line);
            handler.handle_line(&mut *binding.cookie, &mut console, &text)
        };

        self.out.flush()?;
        debug!(?kind, ?flow, "line handler returned");
        Ok(flow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{DELETE, ESCAPE, ctrl};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Calls {
        exec: Vec<String>,
        help: Vec<String>,
    }

    struct RecordExec;

    impl LineHandler<Calls> for RecordExec {
        fn handle_line(&self, calls: &mut Calls, _: &mut Console<'_>, line: &str) -> Flow {
            calls.exec.push(line.to_string());
            if line == "quit" {
                Flow::Exit
            } else {
                Flow::Continue
            }
        }
    }

    struct RecordHelp;

    impl LineHandler<Calls> for RecordHelp {
        fn handle_line(&self, calls: &mut Calls, console: &mut Console<'_>, line: &str) -> Flow {
            calls.help.push(line.to_string());
            let _ = console.write_all(b"help!\r\n");
            Flow::Continue
        }
    }

    fn editor_with<'a>(calls: &'a mut Calls, width: usize) -> Editor<'a, Vec<u8>, Calls> {
        let config = EditorConfig::default().with_line_width(width);
        let mut editor = Editor::new(Vec::new(), config).unwrap();
        editor.setup("> ", calls, &RecordExec, &RecordHelp).unwrap();
        editor
    }

    fn feed_all<C: ?Sized>(editor: &mut Editor<'_, Vec<u8>, C>, bytes: &[u8]) {
        for &b in bytes {
            editor.feed(b).unwrap();
        }
    }

    fn take_output<C: ?Sized>(editor: &mut Editor<'_, Vec<u8>, C>) -> Vec<u8> {
        std::mem::take(editor.output_mut())
    }

    #[test]
    fn test_setup_resets_to_prompt() {
        let mut calls = Calls::default();
        let editor = editor_with(&mut calls, 80);
        assert_eq!(editor.prompt(), "> ");
        assert_eq!(editor.start(), 2);
        assert_eq!(editor.end(), 2);
        assert_eq!(editor.cursor(), 2);
        assert_eq!(editor.state(), DecodeState::Plain);
        assert!(editor.cookie().is_some());
    }

    #[test]
    fn test_setup_twice_is_rejected() {
        let mut first = Calls::default();
        let mut second = Calls::default();
        let mut editor = editor_with(&mut first, 80);
        let result = editor.setup("$ ", &mut second, &RecordExec, &RecordHelp);
        assert!(matches!(result, Err(EditorError::AlreadyConfigured)));
    }

    #[test]
    fn test_setup_rejects_oversized_prompt() {
        let mut calls = Calls::default();
        let mut editor: Editor<'_, Vec<u8>, Calls> =
            Editor::new(Vec::new(), EditorConfig::default().with_line_width(4)).unwrap();
        let result = editor.setup("long> ", &mut calls, &RecordExec, &RecordHelp);
        assert!(matches!(result, Err(EditorError::PromptTooLong { .. })));
        assert!(editor.cookie().is_none());
    }

    #[test]
    fn test_unconfigured_editor_still_edits() {
        let mut editor: Editor<'_, Vec<u8>> = Editor::new(Vec::new(), EditorConfig::default()).unwrap();
        feed_all(&mut editor, b"ab\r");
        assert_eq!(editor.text(), "");
        assert_eq!(take_output(&mut editor), b"ab\r\x1b[K".to_vec());
    }

    #[test]
    fn test_append_echoes_byte() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, b"ls -l");
        assert_eq!(take_output(&mut editor), b"ls -l".to_vec());
        assert_eq!(editor.text(), "ls -l");
        assert_eq!(editor.cursor(), editor.end());
    }

    #[test]
    fn test_mid_line_insert_redraws() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, b"ac");
        feed_all(&mut editor, &[ctrl(b'b')]);
        take_output(&mut editor);

        feed_all(&mut editor, b"b");
        assert_eq!(take_output(&mut editor), b"\r\x1b[K> abc\x08".to_vec());
        assert_eq!(editor.text(), "abc");
        assert_eq!(editor.cursor(), 4);
    }

    #[test]
    fn test_full_line_drops_bytes_silently() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 8);
        feed_all(&mut editor, b"abcdefgh");
        // 8 cells: 2 prompt, 1 terminator, 5 editable.
        assert_eq!(editor.text(), "abcde");
        assert_eq!(take_output(&mut editor), b"abcde".to_vec());
        assert_eq!(editor.end(), editor.capacity() - 1);
    }

    #[test]
    fn test_erase_last_character_uses_rubout() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, b"ab");
        take_output(&mut editor);

        feed_all(&mut editor, &[DELETE]);
        assert_eq!(take_output(&mut editor), b"\x08 \x08".to_vec());
        assert_eq!(editor.text(), "a");

        feed_all(&mut editor, &[ctrl(b'h')]);
        assert_eq!(editor.text(), "");
    }

    #[test]
    fn test_erase_inside_line_redraws() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, b"abc");
        feed_all(&mut editor, &[ctrl(b'b')]);
        take_output(&mut editor);

        feed_all(&mut editor, &[DELETE]);
        assert_eq!(take_output(&mut editor), b"\r\x1b[K> ac\x08".to_vec());
        assert_eq!(editor.text(), "ac");
    }

    #[test]
    fn test_erase_at_start_is_silent() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, &[DELETE]);
        assert!(take_output(&mut editor).is_empty());
        assert_eq!(editor.end(), editor.start());
    }

    #[test]
    fn test_arrow_right_at_end_emits_nothing() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, b"ab");
        take_output(&mut editor);

        feed_all(&mut editor, b"\x1b[C");
        assert!(take_output(&mut editor).is_empty());
        assert_eq!(editor.cursor(), editor.end());
    }

    #[test]
    fn test_arrows_move_one_cell() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, b"ab");
        take_output(&mut editor);

        feed_all(&mut editor, b"\x1b[D");
        assert_eq!(editor.cursor(), 3);
        assert_eq!(take_output(&mut editor), b"\x1b[D".to_vec());

        feed_all(&mut editor, b"\x1b[C");
        assert_eq!(editor.cursor(), 4);
        assert_eq!(take_output(&mut editor), b"\x1b[C".to_vec());

        feed_all(&mut editor, &[ctrl(b'b'), ctrl(b'b'), ctrl(b'b')]);
        assert_eq!(editor.cursor(), editor.start());
        assert_eq!(take_output(&mut editor), b"\x1b[D\x1b[D".to_vec());
    }

    #[test]
    fn test_up_and_down_are_inert() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, b"x");
        take_output(&mut editor);

        feed_all(&mut editor, b"\x1b[A\x1b[B");
        assert!(take_output(&mut editor).is_empty());
        assert_eq!(editor.text(), "x");
        assert_eq!(editor.state(), DecodeState::Plain);
    }

    #[test]
    fn test_parameterized_sequence_leaks_final_byte() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, b"\x1b[3~");
        assert_eq!(editor.text(), "~");
    }

    #[test]
    fn test_escape_state_spans_feeds() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, b"ab");
        editor.feed(ESCAPE).unwrap();
        assert_eq!(editor.state(), DecodeState::Escape);
        editor.feed(b'[').unwrap();
        assert_eq!(editor.state(), DecodeState::EscapeBracket);
        editor.feed(b'D').unwrap();
        assert_eq!(editor.state(), DecodeState::Plain);
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn test_line_start_and_end_redraw() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, b"abc");
        take_output(&mut editor);

        feed_all(&mut editor, &[ctrl(b'a')]);
        assert_eq!(editor.cursor(), editor.start());
        assert_eq!(take_output(&mut editor), b"\r\x1b[K> abc\x08\x08\x08".to_vec());

        feed_all(&mut editor, &[ctrl(b'e')]);
        assert_eq!(editor.cursor(), editor.end());
        assert_eq!(take_output(&mut editor), b"\r\x1b[K> abc".to_vec());
    }

    #[test]
    fn test_empty_enter_skips_handler() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, b"\r");
        assert_eq!(take_output(&mut editor), b"\r\n\r\x1b[K> ".to_vec());
        drop(editor);
        assert!(calls.exec.is_empty());
    }

    #[test]
    fn test_blank_enter_skips_handler() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, b"    \r");
        assert_eq!(editor.text(), "");
        drop(editor);
        assert!(calls.exec.is_empty());
    }

    #[test]
    fn test_enter_runs_exec_once_and_resets() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, b"hello  world");
        take_output(&mut editor);

        assert_eq!(editor.feed(b'\r').unwrap(), Flow::Continue);
        assert_eq!(editor.text(), "");
        assert_eq!(editor.cursor(), editor.start());
        assert_eq!(take_output(&mut editor), b"\r\n\r\x1b[K> ".to_vec());
        drop(editor);
        assert_eq!(calls.exec, vec!["hello  world".to_string()]);
        assert!(calls.help.is_empty());
    }

    #[test]
    fn test_help_keeps_line() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, b"config");
        take_output(&mut editor);

        feed_all(&mut editor, b"?");
        assert_eq!(editor.text(), "config");
        assert_eq!(
            take_output(&mut editor),
            b"\r\nhelp!\r\n\r\x1b[K> config".to_vec()
        );
        drop(editor);
        assert_eq!(calls.help, vec!["config".to_string()]);
        assert!(calls.exec.is_empty());
    }

    #[test]
    fn test_abort_keys_reset_line() {
        for key in [ctrl(b'c'), ctrl(b'd'), ctrl(b'l')] {
            let mut calls = Calls::default();
            let mut editor = editor_with(&mut calls, 80);
            feed_all(&mut editor, b"partial");
            take_output(&mut editor);

            feed_all(&mut editor, &[key]);
            assert_eq!(editor.text(), "");
            assert_eq!(take_output(&mut editor), b"\r\n\r\x1b[K> ".to_vec());
            drop(editor);
            assert!(calls.exec.is_empty());
        }
    }

    #[test]
    fn test_abort_clears_partial_escape() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        editor.feed(ESCAPE).unwrap();
        editor.reset();
        assert_eq!(editor.state(), DecodeState::Plain);
    }

    #[test]
    fn test_exit_flow_skips_redraw() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, b"quit");
        take_output(&mut editor);

        assert_eq!(editor.feed(b'\r').unwrap(), Flow::Exit);
        assert_eq!(take_output(&mut editor), b"\r\n".to_vec());
        assert_eq!(editor.text(), "");
    }

    #[test]
    fn test_message_preserves_edit() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, b"abc");
        feed_all(&mut editor, &[ctrl(b'b')]);
        take_output(&mut editor);

        editor.message("note\r\n").unwrap();
        assert_eq!(
            take_output(&mut editor),
            b"\r\x1b[Knote\r\n\r\x1b[K> abc\x08".to_vec()
        );
        assert_eq!(editor.text(), "abc");
    }

    #[test]
    fn test_unbound_bytes_are_ignored() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        feed_all(&mut editor, &[b'\t', b'\n', 0x00, 0x80, 0xff]);
        assert!(take_output(&mut editor).is_empty());
        assert_eq!(editor.text(), "");
    }

    #[test]
    fn test_run_reads_until_end_of_input() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        let end = editor.run(&b"one\rtwo\r"[..]).unwrap();
        assert_eq!(end, SessionEnd::EndOfInput);
        assert!(editor.output().starts_with(b"\r\x1b[K> "));
        drop(editor);
        assert_eq!(calls.exec, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_run_stops_on_exit() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 80);
        let end = editor.run(&b"quit\rafter\r"[..]).unwrap();
        assert_eq!(end, SessionEnd::ExitRequested);
        drop(editor);
        assert_eq!(calls.exec, vec!["quit".to_string()]);
    }

    #[test]
    fn test_prompt_never_changes_under_random_input() {
        let mut calls = Calls::default();
        let mut editor = editor_with(&mut calls, 16);
        let alphabet = [
            b'a', b'b', b' ', DELETE, ctrl(b'a'), ctrl(b'e'), ctrl(b'b'), ctrl(b'f'), ESCAPE,
            b'[', b'C', b'D', b'\r', ctrl(b'c'),
        ];
        let mut seed: u32 = 7;
        for _ in 0..5000 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let byte = alphabet[(seed >> 16) as usize % alphabet.len()];
            editor.feed(byte).unwrap();

            assert!(editor.start() <= editor.cursor());
            assert!(editor.cursor() <= editor.end());
            assert!(editor.end() <= editor.capacity() - 1);
            assert_eq!(&editor.line().visible()[..editor.start()], b"> ");
        }
    }

    #[derive(Clone, Default)]
    struct EventLog(Rc<RefCell<Vec<&'static str>>>);

    impl EventLog {
        fn push(&self, event: &'static str) {
            self.0.borrow_mut().push(event);
        }

        fn events(&self) -> Vec<&'static str> {
            self.0.borrow().clone()
        }
    }

    struct LoggedMode(EventLog);

    impl TerminalMode for LoggedMode {
        fn suspend(&mut self) -> io::Result<()> {
            self.0.push("suspend");
            Ok(())
        }

        fn resume(&mut self) -> io::Result<()> {
            self.0.push("resume");
            Ok(())
        }
    }

    struct LoggedHandler;

    impl LineHandler<EventLog> for LoggedHandler {
        fn handle_line(&self, log: &mut EventLog, _: &mut Console<'_>, line: &str) -> Flow {
            log.push("handler");
            if line == "boom" {
                panic!("handler failure");
            }
            Flow::Continue
        }
    }

    #[test]
    fn test_terminal_mode_handed_over_around_handler() {
        let log = EventLog::default();
        let mut cookie = log.clone();
        let mut editor = Editor::new(Vec::new(), EditorConfig::default())
            .unwrap()
            .with_terminal_mode(Box::new(LoggedMode(log.clone())));
        editor
            .setup("> ", &mut cookie, &LoggedHandler, &LoggedHandler)
            .unwrap();

        feed_all(&mut editor, b"ok\r");
        assert_eq!(log.events(), vec!["suspend", "handler", "resume"]);

        feed_all(&mut editor, b"?");
        assert_eq!(
            log.events(),
            vec!["suspend", "handler", "resume", "suspend", "handler", "resume"]
        );
    }

    #[test]
    fn test_terminal_mode_resumed_when_handler_panics() {
        let log = EventLog::default();
        let mut cookie = log.clone();
        let mut editor = Editor::new(Vec::new(), EditorConfig::default())
            .unwrap()
            .with_terminal_mode(Box::new(LoggedMode(log.clone())));
        editor
            .setup("> ", &mut cookie, &LoggedHandler, &LoggedHandler)
            .unwrap();
        feed_all(&mut editor, b"boom");

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| editor.feed(b'\r')));
        assert!(result.is_err());
        assert_eq!(log.events(), vec!["suspend", "handler", "resume"]);
    }
}
