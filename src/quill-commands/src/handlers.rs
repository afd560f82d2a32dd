//! Line handlers that connect a [`Dispatcher`] to an [`Editor`].

use std::io::Write;

use quill_editor::{Console, Editor, Flow, LineHandler};
use tracing::{debug, warn};

use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;
use crate::tokenizer::Tokenizer;

/// Tokenizes a submitted line and executes it.
///
/// Dispatch errors are printed on their own line. Returns [`Flow::Exit`]
/// once a leaf has requested it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecHandler {
    tokenizer: Tokenizer,
}

impl ExecHandler {
    /// Creates a handler with the default tokenizer limits.
    pub const fn new() -> Self {
        Self::with_tokenizer(Tokenizer::new(
            crate::tokenizer::MAX_TOKENS,
            crate::tokenizer::MAX_LINE_LEN,
        ))
    }

    /// Creates a handler with custom tokenizer limits.
    pub const fn with_tokenizer(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }
}

impl<'t> LineHandler<Dispatcher<'t>> for ExecHandler {
    fn handle_line(
        &self,
        dispatcher: &mut Dispatcher<'t>,
        console: &mut Console<'_>,
        line: &str,
    ) -> Flow {
        let tokens = self.tokenizer.tokenize(line);
        if let Err(err) = dispatcher.execute(&mut *console, &tokens) {
            debug!(error = %err, line, "command failed");
            report(console, &err);
        }

        if dispatcher.take_exit_request() {
            Flow::Exit
        } else {
            Flow::Continue
        }
    }
}

/// Tokenizes the line being edited and prints help for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpHandler {
    tokenizer: Tokenizer,
}

impl HelpHandler {
    /// Creates a handler with the default tokenizer limits.
    pub const fn new() -> Self {
        Self::with_tokenizer(Tokenizer::new(
            crate::tokenizer::MAX_TOKENS,
            crate::tokenizer::MAX_LINE_LEN,
        ))
    }

    /// Creates a handler with custom tokenizer limits.
    pub const fn with_tokenizer(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }
}

impl<'t> LineHandler<Dispatcher<'t>> for HelpHandler {
    fn handle_line(
        &self,
        dispatcher: &mut Dispatcher<'t>,
        console: &mut Console<'_>,
        line: &str,
    ) -> Flow {
        let tokens = self.tokenizer.tokenize(line);
        match dispatcher.help(&mut *console, &tokens) {
            Ok(outcome) => debug!(?outcome, line, "help shown"),
            // The walk already printed the options for these.
            Err(err @ (DispatchError::Unknown { .. } | DispatchError::InvalidEntry { .. })) => {
                debug!(error = %err, line, "help walk stopped");
            }
            Err(err) => warn!(error = %err, "failed to print help"),
        }
        Flow::Continue
    }
}

static EXEC: ExecHandler = ExecHandler::new();
static HELP: HelpHandler = HelpHandler::new();

/// Installs `dispatcher` as the editor's exec and help target.
pub fn attach<'a, 't, W: Write>(
    editor: &mut Editor<'a, W, Dispatcher<'t>>,
    prompt: &str,
    dispatcher: &'a mut Dispatcher<'t>,
) -> quill_editor::Result<()> {
    editor.setup(prompt, dispatcher, &EXEC, &HELP)
}

fn report(console: &mut Console<'_>, err: &DispatchError) {
    if let Err(io) = writeln!(console, "{err}") {
        warn!(error = %io, "failed to report command error");
    }
}
