//! Command tables: an immutable tree of named commands.

use std::collections::HashSet;
use std::fmt;

use crate::dispatcher::CommandContext;
use crate::error::CommandResult;

/// A leaf's action: receives the context and the tokens after its name.
pub type Action = Box<dyn Fn(&mut CommandContext<'_>, &[&str]) -> CommandResult + Send + Sync>;

/// What a command does when matched.
pub enum CommandKind {
    /// Runs an action with the remaining tokens.
    Leaf(Action),
    /// Descends into a table of subcommands.
    Group(CommandTable),
    /// Neither; matching it is a table configuration error.
    Unbound,
}

impl fmt::Debug for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Leaf(_) => f.write_str("Leaf(<action>)"),
            CommandKind::Group(table) => f.debug_tuple("Group").field(table).finish(),
            CommandKind::Unbound => f.write_str("Unbound"),
        }
    }
}

/// A named entry in a [`CommandTable`].
#[derive(Debug)]
pub struct Command {
    name: String,
    help: String,
    kind: CommandKind,
}

impl Command {
    /// Creates a leaf command.
    pub fn leaf<F>(name: impl Into<String>, help: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>, &[&str]) -> CommandResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            help: help.into(),
            kind: CommandKind::Leaf(Box::new(action)),
        }
    }

    /// Creates a command that groups subcommands.
    pub fn group(name: impl Into<String>, help: impl Into<String>, children: CommandTable) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            kind: CommandKind::Group(children),
        }
    }

    /// Creates an entry with neither an action nor subcommands.
    ///
    /// Useful as a placeholder while a table is being built; dispatching to
    /// it reports an invalid table entry.
    pub fn unbound(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            kind: CommandKind::Unbound,
        }
    }

    /// The name matched against tokens.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line help text.
    pub fn help(&self) -> &str {
        &self.help
    }

    /// What the command does.
    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }
}

/// A problem found by [`CommandTable::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableIssue {
    /// A sibling with the same name appears earlier and shadows this one.
    Duplicate {
        /// Path to the shadowed entry, space separated.
        path: String,
    },
    /// An entry with neither an action nor subcommands.
    Unbound {
        /// Path to the entry, space separated.
        path: String,
    },
}

impl fmt::Display for TableIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableIssue::Duplicate { path } => {
                write!(f, "duplicate command `{path}` is shadowed by an earlier entry")
            }
            TableIssue::Unbound { path } => {
                write!(f, "command `{path}` has neither an action nor subcommands")
            }
        }
    }
}

/// An ordered list of sibling commands.
///
/// Order is kept for help listings. Lookup is exact and case-sensitive, and
/// the first entry with a matching name wins.
#[derive(Debug, Default)]
pub struct CommandTable {
    commands: Vec<Command>,
}

impl CommandTable {
    /// Creates a table from its entries.
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// Finds the first command named `name`.
    pub fn find(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// Number of entries at this level.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Checks the whole tree for shadowed duplicates and unbound entries.
    pub fn validate(&self) -> Vec<TableIssue> {
        let mut issues = Vec::new();
        self.collect_issues("", &mut issues);
        issues
    }

    fn collect_issues(&self, prefix: &str, issues: &mut Vec<TableIssue>) {
        let mut seen = HashSet::new();
        for command in &self.commands {
            let path = if prefix.is_empty() {
                command.name.clone()
            } else {
                format!("{prefix} {}", command.name)
            };

            if !seen.insert(command.name.as_str()) {
                issues.push(TableIssue::Duplicate { path: path.clone() });
            }
            match &command.kind {
                CommandKind::Leaf(_) => {}
                CommandKind::Group(children) => children.collect_issues(&path, issues),
                CommandKind::Unbound => issues.push(TableIssue::Unbound { path }),
            }
        }
    }
}

impl<'t> IntoIterator for &'t CommandTable {
    type Item = &'t Command;
    type IntoIter = std::slice::Iter<'t, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
