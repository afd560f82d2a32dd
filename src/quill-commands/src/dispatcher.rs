//! Walks a command table with a line's tokens, to run a leaf or to print
//! help for where the tokens lead.

use std::io::{self, Write};

use tracing::debug;

use crate::error::DispatchError;
use crate::table::{Action, Command, CommandKind, CommandTable};

/// What a help walk found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpOutcome {
    /// The tokens name a complete leaf command.
    Complete,
    /// The tokens stop at a group; its options were listed.
    Options,
}

/// Everything a leaf action can reach while it runs.
pub struct CommandContext<'a> {
    out: &'a mut dyn Write,
    path: &'a str,
    exit_requested: &'a mut bool,
}

impl<'a> CommandContext<'a> {
    /// Creates a context writing to `out` for the command at `path`.
    pub fn new(out: &'a mut dyn Write, path: &'a str, exit_requested: &'a mut bool) -> Self {
        Self {
            out,
            path,
            exit_requested,
        }
    }

    /// The matched command names, space separated.
    pub fn path(&self) -> &str {
        self.path
    }

    /// Asks the session to end once this command returns.
    pub fn request_exit(&mut self) {
        *self.exit_requested = true;
    }

    /// Returns true if [`CommandContext::request_exit`] was called.
    pub fn exit_requested(&self) -> bool {
        *self.exit_requested
    }
}

impl Write for CommandContext<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Where a walk stopped.
enum WalkEnd<'t> {
    Leaf { action: &'t Action, args_from: usize },
    Unknown { index: usize, table: &'t CommandTable },
    Incomplete { table: &'t CommandTable },
    Invalid,
}

struct Walk<'t> {
    path: Vec<&'t Command>,
    end: WalkEnd<'t>,
}

impl Walk<'_> {
    fn path_string(&self) -> String {
        let names: Vec<&str> = self.path.iter().map(|c| c.name()).collect();
        names.join(" ")
    }
}

/// Runs and explains commands from a borrowed [`CommandTable`].
#[derive(Debug)]
pub struct Dispatcher<'t> {
    root: &'t CommandTable,
    exit_requested: bool,
}

impl<'t> Dispatcher<'t> {
    /// Creates a dispatcher over `root`.
    pub fn new(root: &'t CommandTable) -> Self {
        Self {
            root,
            exit_requested: false,
        }
    }

    /// Returns true if a leaf asked to end the session.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Returns and clears the exit request.
    pub fn take_exit_request(&mut self) -> bool {
        std::mem::take(&mut self.exit_requested)
    }

    /// Runs the leaf named by `tokens`, passing it the tokens after its
    /// name.
    pub fn execute(&mut self, out: &mut dyn Write, tokens: &[&str]) -> Result<(), DispatchError> {
        let walk = self.walk(tokens);
        let path = walk.path_string();

        match walk.end {
            WalkEnd::Leaf { action, args_from } => {
                let args = &tokens[args_from..];
                debug!(command = %path, ?args, "executing command");
                let mut ctx = CommandContext::new(out, &path, &mut self.exit_requested);
                action(&mut ctx, args).map_err(|source| DispatchError::Command {
                    path: path.clone(),
                    source,
                })
            }
            WalkEnd::Unknown { index, .. } => Err(DispatchError::Unknown {
                token: tokens[index].to_string(),
            }),
            WalkEnd::Incomplete { .. } => Err(DispatchError::Incomplete { path }),
            WalkEnd::Invalid => Err(DispatchError::InvalidEntry { path }),
        }
    }

    /// Prints where `tokens` lead.
    ///
    /// Each matched command is listed indented two spaces per token
    /// position. A walk ending at a group lists the group's children one
    /// level deeper than the `options:` header; an unmatched token lists
    /// the table it was looked up in.
    pub fn help(&self, out: &mut dyn Write, tokens: &[&str]) -> Result<HelpOutcome, DispatchError> {
        let walk = self.walk(tokens);
        for (depth, command) in walk.path.iter().enumerate() {
            writeln!(out, "{}{} - {}", indent(depth), command.name(), command.help())?;
        }

        let depth = walk.path.len();
        match walk.end {
            WalkEnd::Leaf { .. } => {
                writeln!(out, "command is complete.")?;
                Ok(HelpOutcome::Complete)
            }
            WalkEnd::Unknown { index, table } => {
                writeln!(out, "{}{} unknown, options:", indent(depth), tokens[index])?;
                print_table(out, table, depth + 1)?;
                Err(DispatchError::Unknown {
                    token: tokens[index].to_string(),
                })
            }
            WalkEnd::Incomplete { table } => {
                writeln!(out, "{}options:", indent(depth))?;
                print_table(out, table, depth + 1)?;
                Ok(HelpOutcome::Options)
            }
            WalkEnd::Invalid => {
                writeln!(out, "invalid command table entry.")?;
                Err(DispatchError::InvalidEntry {
                    path: walk.path_string(),
                })
            }
        }
    }

    fn walk(&self, tokens: &[&str]) -> Walk<'t> {
        let mut table = self.root;
        let mut path = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            let Some(command) = table.find(token) else {
                return Walk {
                    path,
                    end: WalkEnd::Unknown { index, table },
                };
            };
            path.push(command);

            match command.kind() {
                CommandKind::Leaf(action) => {
                    return Walk {
                        path,
                        end: WalkEnd::Leaf {
                            action,
                            args_from: index + 1,
                        },
                    };
                }
                CommandKind::Group(children) => table = children,
                CommandKind::Unbound => {
                    return Walk {
                        path,
                        end: WalkEnd::Invalid,
                    };
                }
            }
        }

        Walk {
            path,
            end: WalkEnd::Incomplete { table },
        }
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn print_table(out: &mut dyn Write, table: &CommandTable, depth: usize) -> io::Result<()> {
    for command in table {
        writeln!(out, "{}{} - {}", indent(depth), command.name(), command.help())?;
    }
    Ok(())
}
