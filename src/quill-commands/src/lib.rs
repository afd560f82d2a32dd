//! Command tables, tokenizer and dispatcher for quill.
//!
//! A host builds a [`CommandTable`] tree once at startup and hands a
//! [`Dispatcher`] over it to the line editor with [`attach`]. Each submitted
//! line is split into tokens and walked down the tree:
//!
//! - a leaf runs with the tokens after its name;
//! - a group consumes one token and descends;
//! - running out of tokens at a group is an incomplete command;
//! - an unmatched token is an unknown command.
//!
//! Pressing `?` walks the same way but only prints where the tokens lead.
//!
//! ```
//! use quill_commands::{Command, CommandTable, Dispatcher};
//! use std::io::Write;
//!
//! let table = CommandTable::new(vec![Command::leaf("hello", "greet", |ctx, args| {
//!     writeln!(ctx, "hello {}", args.join(" "))?;
//!     Ok(())
//! })]);
//!
//! let mut out = Vec::new();
//! Dispatcher::new(&table).execute(&mut out, &["hello", "there"]).unwrap();
//! assert_eq!(out, b"hello there\n");
//! ```

#![warn(missing_docs)]

pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod table;
pub mod tokenizer;

pub use dispatcher::{CommandContext, Dispatcher, HelpOutcome};
pub use error::{CommandError, CommandResult, DispatchError};
pub use handlers::{ExecHandler, HelpHandler, attach};
pub use table::{Action, Command, CommandKind, CommandTable, TableIssue};
pub use tokenizer::{MAX_LINE_LEN, MAX_TOKENS, Tokenizer, tokenize};
