//! quill: an interactive command shell.
//!
//! The binary wires the pieces together:
//!
//! - [`cli`]: argument parsing
//! - [`config`]: layered settings
//! - [`logging`]: tracing subscriber setup
//! - [`commands`]: the shell's command table
//! - [`session`]: the read loop over the line editor

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod session;

pub use cli::{Cli, LogLevel};
pub use config::{ConfigError, ShellConfig};
pub use session::run_session;
