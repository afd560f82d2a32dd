use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use quill_cli::{Cli, commands, config, logging, run_session};
use quill_editor::{SessionEnd, TerminalMode};
use quill_terminal::RawMode;
use tracing::debug;

fn main() -> Result<()> {
    quill_terminal::install_panic_hook();

    let cli = Cli::parse();
    let config = config::resolve(&cli).context("failed to load configuration")?;
    let raw = !cli.no_raw && quill_terminal::is_interactive();
    let _log_guard = logging::init(config.log_level, cli.log_file.as_deref(), raw)?;
    debug!(?config, "configuration resolved");

    let table = commands::root_table(&config);

    let mode: Option<Box<dyn TerminalMode>> = if raw {
        let raw: Box<dyn TerminalMode> =
            Box::new(RawMode::enter().context("failed to put the terminal into raw mode")?);
        Some(raw)
    } else {
        None
    };

    // The editor owns the raw-mode guard; the terminal is restored when the
    // session returns.
    let end = run_session(io::stdin().lock(), io::stdout().lock(), &config, &table, mode)
        .context("session failed")?;

    if end == SessionEnd::EndOfInput {
        let mut stdout = io::stdout();
        writeln!(stdout)?;
        stdout.flush()?;
    }
    Ok(())
}
