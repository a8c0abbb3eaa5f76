//! Text renderings of engine results. Pure functions so output can be snapshot-tested.

use pitaka_core::{
    format::{percent, short_day_with_year, CurrencyFormatter},
    net_income, total_deductions, AnalyticsSummary, BudgetUtilization, CategoryShare,
    DashboardTotals, DateBucket, ExpensePage, FinancialReport, SpendingPoint,
};
use pitaka_domain::{IncomeEntry, RecordId};

use crate::cli::table::{Table, TableColumn};

/// Characters of a record id shown in listings and accepted as a prefix.
pub const SHORT_ID_LEN: usize = 8;
const DESCRIPTION_WIDTH: usize = 28;

pub fn short_id(id: &RecordId) -> String {
    id.as_str().chars().take(SHORT_ID_LEN).collect()
}

pub fn income_table(entries: &[&IncomeEntry], money: &dyn CurrencyFormatter) -> String {
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Date"),
        TableColumn::right("Gross"),
        TableColumn::right("Deductions"),
        TableColumn::right("Net"),
    ]);
    for entry in entries {
        table.push_row(vec![
            short_id(&entry.id),
            entry.date.to_string(),
            money.format_amount(entry.gross_amount),
            money.format_amount(total_deductions(entry)),
            money.format_amount(net_income(entry)),
        ]);
    }
    table.render()
}

/// One deduction per line for a single paycheck.
pub fn income_detail(entry: &IncomeEntry, money: &dyn CurrencyFormatter) -> String {
    let mut rows = vec![
        ("Date", entry.date.to_string()),
        ("Gross", money.format_amount(entry.gross_amount)),
    ];
    rows.extend(
        entry
            .deductions
            .iter()
            .filter(|(_, amount)| *amount > 0.0)
            .map(|(kind, amount)| (kind.label(), money.format_amount(amount))),
    );
    rows.push(("Net", money.format_amount(net_income(entry))));
    Table::key_value(rows).render()
}

pub fn expense_page(page: &ExpensePage<'_>, money: &dyn CurrencyFormatter) -> String {
    if page.items.is_empty() {
        return "No expenses match.".to_string();
    }
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
        TableColumn::left("Description").max_width(DESCRIPTION_WIDTH),
    ]);
    for expense in &page.items {
        table.push_row(vec![
            short_id(&expense.id),
            expense.date.to_string(),
            expense.category.label().to_string(),
            money.format_amount(expense.amount),
            expense.description.clone(),
        ]);
    }
    format!(
        "{}\nShowing {}-{} of {} (page {}/{})",
        table.render(),
        page.first_row(),
        page.last_row(),
        page.total_matches,
        page.page,
        page.total_pages
    )
}

pub fn dashboard(totals: &DashboardTotals, money: &dyn CurrencyFormatter) -> String {
    Table::key_value(vec![
        ("Lifetime earnings", money.format_amount(totals.lifetime_earnings)),
        ("Total deductions", money.format_amount(totals.total_deductions)),
        ("Net income", money.format_amount(totals.total_net_income)),
        ("Expenses", money.format_amount(totals.total_expenses)),
        ("Savings", money.format_amount(totals.total_savings)),
        ("Wallet balance", money.format_amount(totals.wallet_balance)),
    ])
    .render()
}

pub fn analytics(
    summary: &AnalyticsSummary,
    utilization: &BudgetUtilization,
    money: &dyn CurrencyFormatter,
) -> String {
    Table::key_value(vec![
        ("Total net income", money.format_amount(summary.total_net_income)),
        ("Average net income", money.format_amount(summary.average_net_income)),
        ("Total expenses", money.format_amount(summary.total_expenses)),
        ("Net balance", money.format_amount(summary.net_balance)),
        ("Income entries", summary.income_count.to_string()),
        (
            "Budget used",
            format!("{} ({})", percent(utilization.utilization), utilization.level),
        ),
    ])
    .render()
}

pub fn buckets(buckets: &[DateBucket], money: &dyn CurrencyFormatter) -> String {
    let mut table = Table::new(vec![
        TableColumn::left("Period"),
        TableColumn::left("Range"),
        TableColumn::right("Income"),
        TableColumn::right("Expenses"),
        TableColumn::right("Net"),
    ]);
    for bucket in buckets {
        table.push_row(vec![
            bucket.label.clone(),
            bucket.date_range.clone(),
            money.format_amount(bucket.net_income),
            money.format_amount(bucket.expenses),
            money.format_amount(bucket.net),
        ]);
    }
    table.render()
}

pub fn category_breakdown(shares: &[CategoryShare], money: &dyn CurrencyFormatter) -> String {
    if shares.is_empty() {
        return "No expenses recorded.".to_string();
    }
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
        TableColumn::right("Count"),
        TableColumn::right("Share"),
    ]);
    for share in shares {
        table.push_row(vec![
            share.category.label().to_string(),
            money.format_amount(share.amount),
            share.count.to_string(),
            percent(share.percentage),
        ]);
    }
    table.render()
}

pub fn spending(points: &[SpendingPoint], money: &dyn CurrencyFormatter) -> String {
    let mut table = Table::new(vec![TableColumn::left("Day"), TableColumn::right("Spent")]);
    for point in points {
        table.push_row(vec![point.label.clone(), money.format_amount(point.amount)]);
    }
    table.render()
}

pub fn report(report: &FinancialReport, money: &dyn CurrencyFormatter) -> String {
    let mut out = format!("Period: {}\n\n", report.period);
    out.push_str(&Table::key_value(vec![
        ("Total net income", money.format_amount(report.summary.total_net_income)),
        ("Average net income", money.format_amount(report.summary.average_net_income)),
        ("Total expenses", money.format_amount(report.summary.total_expenses)),
        ("Net balance", money.format_amount(report.summary.net_balance)),
    ])
    .render());

    out.push_str("\n\nIncome\n");
    if report.income_rows.is_empty() {
        out.push_str("No income recorded.");
    } else {
        let mut table = Table::new(vec![
            TableColumn::left("Date"),
            TableColumn::right("Gross"),
            TableColumn::right("Deductions"),
            TableColumn::right("Net"),
        ]);
        for row in &report.income_rows {
            table.push_row(vec![
                short_day_with_year(row.date),
                money.format_amount(row.gross_amount),
                money.format_amount(row.deductions),
                money.format_amount(row.net_income),
            ]);
        }
        out.push_str(&table.render());
    }

    out.push_str(&format!("\n\nExpenses by category ({})\n", report.expense_count));
    out.push_str(&category_breakdown(&report.categories, money));
    out
}
