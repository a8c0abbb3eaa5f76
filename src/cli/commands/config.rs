use pitaka_config::Config;

use crate::cli::error::{CommandError, CommandResult};
use crate::cli::output::{self, section};
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

const USAGE: &str = "config [show | set <key> <value> | backup [note] | backups | restore <name>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => show(context),
        ["set", key, value @ ..] if !value.is_empty() => set(context, key, &value.join(" ")),
        ["backup"] => backup(context, None),
        ["backup", note @ ..] => backup(context, Some(note.join(" ").as_str())),
        ["backups"] => list_backups(context),
        ["restore", name] => restore(context, name),
        _ => Err(CommandError::usage(USAGE)),
    }
}

fn show(context: &ShellContext) -> CommandResult {
    section("Configuration");
    for key in Config::KEYS {
        output::info(format!("  {:<18} {}", key, context.config.get(key)?));
    }
    output::info(format!(
        "  {:<18} {}",
        "config file",
        context.config_manager.config_path().display()
    ));
    Ok(())
}

fn set(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value)?;
    context.config_manager.save(&updated)?;
    let shown = updated.get(key)?;
    context.apply_config(updated)?;
    output::success(format!("{key} set to {shown}."));
    Ok(())
}

fn backup(context: &ShellContext, note: Option<&str>) -> CommandResult {
    let name = context.config_manager.backup(&context.config, note)?;
    output::success(format!("Configuration backed up as {name}."));
    Ok(())
}

fn list_backups(context: &ShellContext) -> CommandResult {
    let backups = context.config_manager.list_backups()?;
    if backups.is_empty() {
        output::info("No configuration backups.");
    }
    for backup in backups {
        let stamp = backup.created_at.format("%Y-%m-%d %H:%M:%S");
        match backup.note {
            Some(note) => output::info(format!("  {}  {stamp}  {note}", backup.name)),
            None => output::info(format!("  {}  {stamp}", backup.name)),
        }
    }
    Ok(())
}

fn restore(context: &mut ShellContext, name: &str) -> CommandResult {
    if !context.confirm(&format!("Replace current configuration with {name}?"))? {
        output::info("Restore cancelled.");
        return Ok(());
    }
    let restored = context.config_manager.restore(name)?;
    context.apply_config(restored)?;
    output::success(format!("Configuration restored from {name}."));
    Ok(())
}
