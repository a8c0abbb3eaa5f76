use chrono::Datelike;
use pitaka_core::{
    aggregate, aggregate_month, analytics_summary, budget_utilization, category_breakdown,
    dashboard_totals, financial_report, spending_trend, CoreError, Granularity,
    MAX_SPENDING_TREND_DAYS, SPENDING_TREND_DAYS,
};

use crate::cli::error::{CommandError, CommandResult};
use crate::cli::output::{self, block, section};
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "dashboard",
            "Lifetime earnings, deductions, expenses and balance",
            "dashboard",
            cmd_dashboard,
        ),
        CommandEntry::new(
            "analytics",
            "Average pay, net balance and budget utilization",
            "analytics",
            cmd_analytics,
        ),
        CommandEntry::new(
            "trend",
            "Income vs. expenses per period",
            "trend [daily|weekly|biweekly|monthly|yearly]",
            cmd_trend,
        ),
        CommandEntry::new(
            "month",
            "Day-by-day totals for one month",
            "month <YYYY-MM>",
            cmd_month,
        ),
        CommandEntry::new(
            "spending",
            "Daily spending over the last days",
            "spending [days]",
            cmd_spending,
        ),
        CommandEntry::new(
            "breakdown",
            "Expenses grouped by category",
            "breakdown",
            cmd_breakdown,
        ),
        CommandEntry::new(
            "report",
            "Printable financial report",
            "report [json]",
            cmd_report,
        ),
    ]
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let totals = dashboard_totals(context.session.data());
    section("Dashboard");
    block(&render::dashboard(&totals, &context.money));
    Ok(())
}

fn cmd_analytics(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let data = context.session.data();
    section("Analytics");
    block(&render::analytics(
        &analytics_summary(data),
        &budget_utilization(data),
        &context.money,
    ));
    Ok(())
}

fn cmd_trend(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let granularity: Granularity = match args {
        [] => context.config.default_view.parse()?,
        [raw] => raw.parse()?,
        _ => return Err(CommandError::usage("trend [granularity]")),
    };
    let buckets = aggregate(context.session.data(), granularity, context.today());
    section(format!("{} trend", granularity.label()));
    block(&render::buckets(&buckets, &context.money));
    Ok(())
}

/// `YYYY-MM` to a year and 0-based month index.
pub(crate) fn parse_month(raw: &str) -> Result<(i32, u32), CoreError> {
    let invalid = || CoreError::Parse(format!("expected YYYY-MM, got `{raw}`"));
    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(CoreError::Validation(format!(
            "month must be between 01 and 12, got {month}"
        )));
    }
    Ok((year, month - 1))
}

fn cmd_month(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (year, month_index) = match args {
        [] => {
            let today = context.today();
            (today.year(), today.month0())
        }
        [raw] => parse_month(raw)?,
        _ => return Err(CommandError::usage("month <YYYY-MM>")),
    };
    let buckets = aggregate_month(context.session.data(), year, month_index)?;
    if let Some(first) = buckets.first() {
        section(first.start.format("%B %Y"));
    }
    block(&render::buckets(&buckets, &context.money));
    Ok(())
}

fn cmd_spending(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let days = match args {
        [] => SPENDING_TREND_DAYS,
        [raw] => raw.parse::<u32>().map_err(|_| {
            CommandError::InvalidArguments(format!(
                "days must be between 1 and {MAX_SPENDING_TREND_DAYS}, got `{raw}`"
            ))
        })?,
        _ => return Err(CommandError::usage("spending [days]")),
    };
    let points = spending_trend(&context.session.data().expenses, context.today(), days)?;
    section(format!("Spending, last {days} days"));
    block(&render::spending(&points, &context.money));
    Ok(())
}

fn cmd_breakdown(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let shares = category_breakdown(&context.session.data().expenses);
    section("Expenses by category");
    block(&render::category_breakdown(&shares, &context.money));
    Ok(())
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let report = financial_report(context.session.data());
    match args {
        [] => {
            section(format!("Financial report for {}", context.config.profile_name));
            block(&render::report(&report, &context.money));
        }
        [format] if format.eq_ignore_ascii_case("json") => {
            block(&serde_json::to_string_pretty(&report)?);
        }
        _ => return Err(CommandError::usage("report [json]")),
    }
    if report.income_rows.is_empty() && report.expense_count == 0 {
        output::hint("Add records with `add-income` or `add-expense`.");
    }
    Ok(())
}
