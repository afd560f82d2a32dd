//! Runs one interactive session.

use std::io::{Read, Write};

use quill_commands::{CommandTable, Dispatcher, attach};
use quill_editor::{Editor, EditorError, SessionEnd, TerminalMode};
use tracing::{info, warn};

use crate::config::ShellConfig;

/// Reads `input` until end-of-stream or `quit`, executing each line
/// against `table` and drawing on `output`.
///
/// `mode` is handed back to the terminal while commands run.
pub fn run_session<R, W>(
    input: R,
    output: W,
    config: &ShellConfig,
    table: &CommandTable,
    mode: Option<Box<dyn TerminalMode>>,
) -> Result<SessionEnd, EditorError>
where
    R: Read,
    W: Write,
{
    for issue in table.validate() {
        warn!(%issue, "command table issue");
    }

    let mut dispatcher = Dispatcher::new(table);
    let mut editor = Editor::new(output, config.editor_config())?;
    if let Some(mode) = mode {
        editor = editor.with_terminal_mode(mode);
    }
    attach(&mut editor, &config.prompt, &mut dispatcher)?;

    info!(prompt = %config.prompt, width = config.line_width, "session started");
    let end = editor.run(input)?;
    info!(?end, "session finished");
    Ok(end)
}
