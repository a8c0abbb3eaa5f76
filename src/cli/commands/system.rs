use crate::cli::error::{CommandError, CommandResult};
use crate::cli::help;
use crate::cli::output::{block, section};
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::table::Table;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        )
        .aliases(&["?"]),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("exit", "Save pending edits and exit", "exit", cmd_exit)
            .aliases(&["quit"]),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            section("Available commands");
            block(&help::overview(context.registry));
        }
        [name, ..] => match context.command(&name.to_lowercase()) {
            Some(entry) => {
                section(format!("Help: {}", entry.name));
                block(&help::command(entry));
            }
            None => context.suggest_command(name),
        },
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    section(format!("Pitaka {}", meta.summary()));
    block(
        &Table::key_value(vec![
            ("Built at", meta.timestamp.to_string()),
            ("Target", meta.target.to_string()),
            ("Profile", meta.profile.to_string()),
            ("Rustc", meta.rustc.to_string()),
        ])
        .render(),
    );
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
