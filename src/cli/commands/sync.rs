use pitaka_core::LoadCommit;

use crate::cli::error::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("save", "Write records to the data file now", "save", cmd_save),
        CommandEntry::new(
            "load",
            "Reload records from the data file, discarding unsaved edits",
            "load",
            cmd_load,
        ),
        CommandEntry::new(
            "backups",
            "List automatic backups of the data file",
            "backups",
            cmd_backups,
        ),
    ]
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let outcome = context.persist()?;
    if outcome.saved.total() == 0 {
        output::info("Nothing to save.");
        return Ok(());
    }
    output::success(format!(
        "Saved {} income entries and {} expenses to {}.",
        outcome.saved.income,
        outcome.saved.expenses,
        context.store.document_path().display()
    ));
    if let Some(mapping) = outcome.id_mapping {
        output::info(format!("Assigned permanent ids to {} records.", mapping.len()));
    }
    Ok(())
}

fn cmd_load(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.unsaved_changes > 0
        && !context.confirm(&format!(
            "Discard {} unsaved edits?",
            context.unsaved_changes
        ))?
    {
        output::info("Load cancelled.");
        return Ok(());
    }
    match context.load_records()? {
        LoadCommit::Applied => {
            let data = context.session.data();
            output::success(format!(
                "Loaded {} income entries and {} expenses.",
                data.income_history.len(),
                data.expenses.len()
            ));
            Ok(())
        }
        LoadCommit::Stale | LoadCommit::Closed => Err(CommandError::Message(
            "Load was superseded; records left unchanged.".into(),
        )),
    }
}

fn cmd_backups(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let backups = context.store.list_backups()?;
    if backups.is_empty() {
        output::info("No backups yet.");
        return Ok(());
    }
    for backup in backups {
        let created = backup
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "unknown time".into());
        output::info(format!("  {:<40} {}", backup.id, created));
    }
    Ok(())
}
