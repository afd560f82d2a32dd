//! The shell's command table.

use std::io::Write;

use quill_commands::{Command, CommandContext, CommandResult, CommandTable};

use crate::config::ShellConfig;

/// Builds the root command table.
///
/// ```text
/// quit                 leave the shell
/// hello [NAME...]      greet someone
/// echo [TEXT...]       print the arguments
/// config show          print the effective configuration
/// ```
pub fn root_table(config: &ShellConfig) -> CommandTable {
    let rendered = render_config(config);

    CommandTable::new(vec![
        Command::leaf("quit", "leave the shell", quit),
        Command::leaf("hello", "greet someone: hello [NAME...]", hello),
        Command::leaf("echo", "print the arguments: echo [TEXT...]", echo),
        Command::group(
            "config",
            "inspect the configuration",
            CommandTable::new(vec![Command::leaf(
                "show",
                "print the effective configuration",
                move |ctx, _| {
                    ctx.write_all(rendered.as_bytes())?;
                    Ok(())
                },
            )]),
        ),
    ])
}

fn quit(ctx: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    writeln!(ctx, "bye")?;
    ctx.request_exit();
    Ok(())
}

fn hello(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        writeln!(ctx, "hello, world")?;
    } else {
        writeln!(ctx, "hello, {}", args.join(" "))?;
    }
    Ok(())
}

fn echo(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
    writeln!(ctx, "{}", args.join(" "))?;
    Ok(())
}

fn render_config(config: &ShellConfig) -> String {
    let mut rendered = config.to_toml();
    match &config.source {
        Some(path) => rendered.push_str(&format!("# loaded from {}\n", path.display())),
        None => rendered.push_str("# built-in defaults\n"),
    }
    rendered
}
