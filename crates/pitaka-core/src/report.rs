//! Printable report model: period, headline totals, income rows and category totals.

use std::cmp::Reverse;

use chrono::NaiveDate;
use pitaka_domain::FinancialData;
use serde::Serialize;

use crate::{
    aggregation::{category_breakdown, CategoryShare},
    deductions::{net_income, total_deductions},
    format::short_day_with_year,
    summary::{analytics_summary, AnalyticsSummary},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeRow {
    pub date: NaiveDate,
    pub gross_amount: f64,
    pub deductions: f64,
    pub net_income: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialReport {
    /// `No data`, a single day, or `earliest – latest`.
    pub period: String,
    pub summary: AnalyticsSummary,
    pub income_rows: Vec<IncomeRow>,
    pub categories: Vec<CategoryShare>,
    pub expense_count: usize,
}

pub fn financial_report(data: &FinancialData) -> FinancialReport {
    let mut income_rows: Vec<IncomeRow> = data
        .income_history
        .iter()
        .map(|entry| IncomeRow {
            date: entry.date,
            gross_amount: entry.gross_amount,
            deductions: total_deductions(entry),
            net_income: net_income(entry),
        })
        .collect();
    income_rows.sort_by_key(|row| Reverse(row.date));

    FinancialReport {
        period: report_period(data),
        summary: analytics_summary(data),
        income_rows,
        categories: category_breakdown(&data.expenses),
        expense_count: data.expenses.len(),
    }
}

/// Human-readable span of every record date.
pub fn report_period(data: &FinancialData) -> String {
    match (data.earliest_date(), data.latest_date()) {
        (Some(earliest), Some(latest)) if earliest == latest => short_day_with_year(earliest),
        (Some(earliest), Some(latest)) => format!(
            "{} – {}",
            short_day_with_year(earliest),
            short_day_with_year(latest)
        ),
        _ => "No data".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitaka_domain::{DeductionKind, Expense, ExpenseCategory, IncomeEntry};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn period_covers_all_record_dates() {
        assert_eq!(report_period(&FinancialData::default()), "No data");

        let single = FinancialData::new(vec![IncomeEntry::new(day(2024, 3, 15), 1.0)], Vec::new());
        assert_eq!(report_period(&single), "Mar 15, 2024");

        let span = FinancialData::new(
            vec![IncomeEntry::new(day(2024, 3, 15), 1.0)],
            vec![Expense::new(day(2023, 12, 1), ExpenseCategory::Food, 1.0)],
        );
        assert_eq!(report_period(&span), "Dec 1, 2023 – Mar 15, 2024");
    }

    #[test]
    fn income_rows_are_newest_first() {
        let data = FinancialData::new(
            vec![
                IncomeEntry::new(day(2024, 1, 5), 1000.0).with_deduction(DeductionKind::Sss, 100.0),
                IncomeEntry::new(day(2024, 2, 5), 1200.0),
            ],
            vec![Expense::new(day(2024, 1, 6), ExpenseCategory::Food, 200.0)],
        );
        let report = financial_report(&data);
        assert_eq!(report.income_rows[0].date, day(2024, 2, 5));
        assert_eq!(report.income_rows[1].deductions, 100.0);
        assert_eq!(report.income_rows[1].net_income, 900.0);
        assert_eq!(report.summary.total_net_income, 2100.0);
        assert_eq!(report.categories.len(), 1);
        assert_eq!(report.expense_count, 1);
    }
}
