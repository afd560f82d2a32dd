//! Tracing subscriber setup.
//!
//! stdout carries the line being edited, so logs go to stderr or, with
//! `--log-file`, to a file through a non-blocking writer. While the
//! terminal is in raw mode, stderr output has its line feeds expanded to
//! CR LF so records start at column zero.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Keeps the file writer's worker alive; logs are flushed when dropped.
#[derive(Debug)]
pub struct LogGuard {
    _guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Builds the filter: `RUST_LOG` when set, else `level`.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()))
}

/// Writer that expands `\n` to `\r\n`.
#[derive(Debug)]
pub struct CrlfWriter<W> {
    inner: W,
}

impl<W: Write> CrlfWriter<W> {
    /// Wraps `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CrlfWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for chunk in buf.split_inclusive(|&b| b == b'\n') {
            match chunk.strip_suffix(b"\n") {
                Some(body) => {
                    self.inner.write_all(body)?;
                    self.inner.write_all(b"\r\n")?;
                }
                None => self.inner.write_all(chunk)?,
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Installs the global subscriber.
///
/// `raw_terminal` tells whether stdin will be switched to raw mode, which
/// only affects logging to stderr.
pub fn init(level: LogLevel, log_file: Option<&Path>, raw_terminal: bool) -> Result<LogGuard> {
    let filter = env_filter(level);

    let Some(path) = log_file else {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false);
        let installed = if raw_terminal {
            builder
                .with_writer(|| CrlfWriter::new(io::stderr()))
                .try_init()
        } else {
            builder.with_writer(io::stderr).try_init()
        };
        installed
            .map_err(|err| anyhow!(err))
            .context("failed to install log subscriber")?;
        return Ok(LogGuard { _guard: None });
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("failed to install log subscriber")?;

    Ok(LogGuard {
        _guard: Some(guard),
    })
}
