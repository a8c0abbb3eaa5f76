use std::cmp::Reverse;

use pitaka_core::{validation::parse_amount, Action, RecordKind};
use pitaka_domain::{DeductionKind, Displayable, IncomeEntry};

use super::{parse_date, resolve_record, split_options};
use crate::cli::error::{CommandError, CommandResult};
use crate::cli::output::{self, block};
use crate::cli::registry::CommandEntry;
use crate::cli::render::{self, short_id};
use crate::cli::shell_context::ShellContext;

const ADD_USAGE: &str = "add-income <date|today> <gross> [sss=] [pagibig=] [philhealth=] [vul=] [emergency_fund=] [general_savings=]";
const EDIT_USAGE: &str = "edit-income <id> [date=] [gross=] [sss=] [pagibig=] [philhealth=] [vul=] [emergency_fund=] [general_savings=]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add-income", "Record a paycheck", ADD_USAGE, cmd_add_income).mutating(),
        CommandEntry::new(
            "edit-income",
            "Change a paycheck's date, gross or deductions",
            EDIT_USAGE,
            cmd_edit_income,
        )
        .mutating(),
        CommandEntry::new(
            "delete-income",
            "Delete a paycheck",
            "delete-income <id>",
            cmd_delete_income,
        ),
        CommandEntry::new(
            "list-income",
            "List paychecks, newest first",
            "list-income",
            cmd_list_income,
        ),
    ]
}

fn deduction_for_key(key: &str) -> Option<DeductionKind> {
    match key {
        "sss" => Some(DeductionKind::Sss),
        "pagibig" | "pag_ibig" => Some(DeductionKind::Pagibig),
        "philhealth" => Some(DeductionKind::Philhealth),
        "vul" => Some(DeductionKind::Vul),
        "emergency_fund" => Some(DeductionKind::EmergencyFund),
        "general_savings" => Some(DeductionKind::GeneralSavings),
        _ => None,
    }
}

fn apply_deduction(entry: &mut IncomeEntry, key: &str, raw: &str) -> Result<bool, CommandError> {
    let Some(kind) = deduction_for_key(key) else {
        return Ok(false);
    };
    entry.deductions.set(kind, parse_amount(raw, kind.label())?);
    Ok(true)
}

fn cmd_add_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, options) = split_options(args);
    let [date, gross] = positional.as_slice() else {
        return Err(CommandError::usage(ADD_USAGE));
    };
    let mut entry = IncomeEntry::new(parse_date(context, date)?, parse_amount(gross, "gross")?);
    for (key, value) in &options {
        if !apply_deduction(&mut entry, key, value)? {
            return Err(CommandError::InvalidArguments(format!(
                "unknown deduction `{key}`"
            )));
        }
    }

    let id = short_id(&entry.id);
    context.session.dispatch(Action::AddIncome(entry.clone()))?;
    output::success(format!("Income {id} recorded."));
    block(&render::income_detail(&entry, &context.money));
    Ok(())
}

fn cmd_edit_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, options) = split_options(args);
    let [prefix] = positional.as_slice() else {
        return Err(CommandError::usage(EDIT_USAGE));
    };
    if options.is_empty() {
        return Err(CommandError::usage(EDIT_USAGE));
    }
    let mut entry = resolve_record(
        RecordKind::Income,
        prefix,
        &context.session.data().income_history,
    )?
    .clone();

    for (key, value) in &options {
        match key.as_str() {
            "date" => entry.date = parse_date(context, value)?,
            "gross" | "gross_amount" | "weekly_salary" => {
                entry.gross_amount = parse_amount(value, "gross")?
            }
            other => {
                if !apply_deduction(&mut entry, other, value)? {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown income field `{other}`"
                    )));
                }
            }
        }
    }

    let id = short_id(&entry.id);
    context.session.dispatch(Action::UpdateIncome(entry.clone()))?;
    output::success(format!("Income {id} updated."));
    block(&render::income_detail(&entry, &context.money));
    Ok(())
}

fn cmd_delete_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [prefix] = args else {
        return Err(CommandError::usage("delete-income <id>"));
    };
    let entry = resolve_record(
        RecordKind::Income,
        prefix,
        &context.session.data().income_history,
    )?;
    let (id, label) = (entry.id.clone(), entry.display_label());
    if !context.confirm(&format!("Delete {label}?"))? {
        output::info("Nothing deleted.");
        return Ok(());
    }
    context.session.dispatch(Action::DeleteIncome(id.clone()))?;
    // Saves only upsert, so the stored row is dropped here.
    context.store.remove(RecordKind::Income, &id)?;
    tracing::info!(%id, "income deleted");
    output::success(format!("Income {} deleted ({label}).", short_id(&id)));
    Ok(())
}

fn cmd_list_income(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let mut entries: Vec<&IncomeEntry> = context.session.data().income_history.iter().collect();
    if entries.is_empty() {
        output::info("No income recorded.");
        return Ok(());
    }
    entries.sort_by_key(|entry| Reverse(entry.date));
    block(&render::income_table(&entries, &context.money));
    Ok(())
}
