use pitaka_core::{
    format::CurrencyFormatter, validation::parse_amount, Action, CoreError, ExpenseQuery,
    RecordKind,
};
use pitaka_domain::{Displayable, Expense, ExpenseCategory};

use super::{parse_date, resolve_record, split_options};
use crate::cli::error::{CommandError, CommandResult};
use crate::cli::output::{self, block};
use crate::cli::registry::CommandEntry;
use crate::cli::render::{self, short_id};
use crate::cli::shell_context::ShellContext;

const ADD_USAGE: &str = "add-expense <date|today> <category> <amount> [description]";
const EDIT_USAGE: &str = "edit-expense <id> [date=] [category=] [amount=] [description=]";
const LIST_USAGE: &str = "list-expenses [search=<text>] [category=<name>] [page=<n>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add-expense", "Record an expense", ADD_USAGE, cmd_add_expense)
            .mutating(),
        CommandEntry::new(
            "edit-expense",
            "Change an expense",
            EDIT_USAGE,
            cmd_edit_expense,
        )
        .mutating(),
        CommandEntry::new(
            "delete-expense",
            "Delete an expense",
            "delete-expense <id>",
            cmd_delete_expense,
        ),
        CommandEntry::new(
            "list-expenses",
            "Search and page through expenses, newest first",
            LIST_USAGE,
            cmd_list_expenses,
        ),
    ]
}

fn parse_category(raw: &str) -> Result<ExpenseCategory, CommandError> {
    raw.parse::<ExpenseCategory>().map_err(|err| {
        let known: Vec<&str> = ExpenseCategory::ALL.iter().map(|c| c.label()).collect();
        CoreError::Parse(format!("{err}; expected one of: {}", known.join(", "))).into()
    })
}

fn cmd_add_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (date, category, amount, description) = match args {
        [date, category, amount] => (date, category, amount, String::new()),
        [date, category, amount, rest @ ..] => (date, category, amount, rest.join(" ")),
        _ => return Err(CommandError::usage(ADD_USAGE)),
    };
    let expense = Expense::new(
        parse_date(context, date)?,
        parse_category(category)?,
        parse_amount(amount, "amount")?,
    )
    .with_description(description.trim());

    let line = format!(
        "{} {} on {}",
        expense.category,
        context.money.format_amount(expense.amount),
        expense.date
    );
    let id = short_id(&expense.id);
    context.session.dispatch(Action::AddExpense(expense))?;
    output::success(format!("Expense {id} recorded: {line}."));
    Ok(())
}

fn cmd_edit_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, options) = split_options(args);
    let [prefix] = positional.as_slice() else {
        return Err(CommandError::usage(EDIT_USAGE));
    };
    if options.is_empty() {
        return Err(CommandError::usage(EDIT_USAGE));
    }
    let mut expense =
        resolve_record(RecordKind::Expense, prefix, &context.session.data().expenses)?.clone();

    for (key, value) in &options {
        match key.as_str() {
            "date" => expense.date = parse_date(context, value)?,
            "category" => expense.category = parse_category(value)?,
            "amount" => expense.amount = parse_amount(value, "amount")?,
            "description" | "note" => expense.description = value.trim().to_string(),
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown expense field `{other}`"
                )))
            }
        }
    }

    let id = short_id(&expense.id);
    context.session.dispatch(Action::UpdateExpense(expense))?;
    output::success(format!("Expense {id} updated."));
    Ok(())
}

fn cmd_delete_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [prefix] = args else {
        return Err(CommandError::usage("delete-expense <id>"));
    };
    let expense = resolve_record(RecordKind::Expense, prefix, &context.session.data().expenses)?;
    let (id, label) = (expense.id.clone(), expense.display_label());
    if !context.confirm(&format!("Delete {label}?"))? {
        output::info("Nothing deleted.");
        return Ok(());
    }
    context.session.dispatch(Action::DeleteExpense(id.clone()))?;
    context.store.remove(RecordKind::Expense, &id)?;
    tracing::info!(%id, "expense deleted");
    output::success(format!("Expense {} deleted ({label}).", short_id(&id)));
    Ok(())
}

fn cmd_list_expenses(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, options) = split_options(args);
    let mut query = ExpenseQuery::new().page(1);
    if !positional.is_empty() {
        query = query.search(positional.join(" "));
    }
    for (key, value) in &options {
        query = match key.as_str() {
            "search" => query.search(*value),
            "category" => query.category(parse_category(value)?),
            "page" => query.page(value.parse().map_err(|_| {
                CommandError::InvalidArguments(format!("page must be a number, got `{value}`"))
            })?),
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown filter `{other}`; usage: {LIST_USAGE}"
                )))
            }
        };
    }

    let page = query.run(&context.session.data().expenses);
    block(&render::expense_page(&page, &context.money));
    Ok(())
}
