//! Sums records into bucket series and category breakdowns for charting.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use pitaka_domain::{Expense, ExpenseCategory, FinancialData};
use serde::Serialize;

use crate::{
    buckets::{build_buckets, locate, month_buckets, BucketSpan, DateBucket},
    deductions::net_income,
    format::short_day,
    CoreError, Granularity,
};

/// Default window of the spending trend.
pub const SPENDING_TREND_DAYS: u32 = 14;

/// Longest trailing window `spending_trend` accepts.
pub const MAX_SPENDING_TREND_DAYS: u32 = 366;

/// Income vs. expense series at `granularity`, from the oldest record through today.
pub fn aggregate(data: &FinancialData, granularity: Granularity, today: NaiveDate) -> Vec<DateBucket> {
    let span = BucketSpan::for_data(data, today);
    let buckets = fill_buckets(build_buckets(granularity, span), data);
    tracing::debug!(
        granularity = %granularity,
        buckets = buckets.len(),
        records = data.record_count(),
        "aggregated series"
    );
    buckets
}

/// Day-by-day series for one calendar month. `month_index` is 0-based.
pub fn aggregate_month(
    data: &FinancialData,
    year: i32,
    month_index: u32,
) -> Result<Vec<DateBucket>, CoreError> {
    Ok(fill_buckets(month_buckets(year, month_index)?, data))
}

fn fill_buckets(mut buckets: Vec<DateBucket>, data: &FinancialData) -> Vec<DateBucket> {
    for entry in &data.income_history {
        if let Some(idx) = locate(&buckets, entry.date) {
            let bucket = &mut buckets[idx];
            bucket.net_income += net_income(entry);
            bucket.income_count += 1;
        }
    }
    for expense in &data.expenses {
        if let Some(idx) = locate(&buckets, expense.date) {
            let bucket = &mut buckets[idx];
            bucket.expenses += expense.amount;
            bucket.expense_count += 1;
        }
    }
    for bucket in &mut buckets {
        bucket.net = bucket.net_income - bucket.expenses;
    }
    buckets
}

/// One slice of the expense breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: ExpenseCategory,
    pub amount: f64,
    pub count: usize,
    /// Share of all expenses, scaled 0-100.
    pub percentage: f64,
}

/// Expenses grouped by category, largest first; ties keep category order.
pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategoryShare> {
    let mut totals: BTreeMap<ExpenseCategory, (f64, usize)> = BTreeMap::new();
    for expense in expenses {
        let slot = totals.entry(expense.category).or_insert((0.0, 0));
        slot.0 += expense.amount;
        slot.1 += 1;
    }
    let overall: f64 = totals.values().map(|(amount, _)| amount).sum();

    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, (amount, count))| CategoryShare {
            category,
            amount,
            count,
            percentage: if overall > 0.0 {
                amount / overall * 100.0
            } else {
                0.0
            },
        })
        .collect();
    shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    shares
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingPoint {
    pub date: NaiveDate,
    pub label: String,
    pub amount: f64,
}

/// Daily spending over the trailing `days` days ending today, oldest first.
///
/// `days` must be within `1..=MAX_SPENDING_TREND_DAYS`.
pub fn spending_trend(
    expenses: &[Expense],
    today: NaiveDate,
    days: u32,
) -> Result<Vec<SpendingPoint>, CoreError> {
    if !(1..=MAX_SPENDING_TREND_DAYS).contains(&days) {
        return Err(CoreError::Validation(format!(
            "days must be between 1 and {MAX_SPENDING_TREND_DAYS}, got {days}"
        )));
    }
    let days = i64::from(days);
    let first = today
        .checked_sub_signed(Duration::days(days - 1))
        .ok_or_else(|| {
            CoreError::Validation(format!("{days} days before {today} is out of range"))
        })?;
    let mut points: Vec<SpendingPoint> = first
        .iter_days()
        .take(days as usize)
        .map(|date| SpendingPoint {
            date,
            label: short_day(date),
            amount: 0.0,
        })
        .collect();
    for expense in expenses {
        if expense.date < first || expense.date > today {
            continue;
        }
        let idx = (expense.date - first).num_days() as usize;
        points[idx].amount += expense.amount;
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitaka_domain::{DeductionKind, IncomeEntry};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> FinancialData {
        FinancialData::new(
            vec![
                IncomeEntry::new(day(2024, 3, 15), 1000.0)
                    .with_deduction(DeductionKind::Sss, 100.0)
                    .with_deduction(DeductionKind::Pagibig, 50.0),
                IncomeEntry::new(day(2024, 3, 22), 1000.0),
            ],
            vec![
                Expense::new(day(2024, 3, 16), ExpenseCategory::Food, 300.0),
                Expense::new(day(2024, 3, 18), ExpenseCategory::Bills, 700.0),
            ],
        )
    }

    #[test]
    fn weekly_series_sums_net_income_and_expenses() {
        let buckets = aggregate(&sample(), Granularity::Weekly, day(2024, 3, 23));
        assert_eq!(buckets.len(), 3);

        let first = &buckets[0];
        assert_eq!(first.start, day(2024, 3, 10));
        assert_eq!(first.net_income, 850.0);
        assert_eq!(first.expenses, 300.0);
        assert_eq!(first.net, 550.0);
        assert_eq!((first.income_count, first.expense_count), (1, 1));

        let second = &buckets[1];
        assert_eq!(second.expenses, 700.0);
        assert_eq!(second.net, -700.0);

        let third = &buckets[2];
        assert_eq!(third.end, day(2024, 3, 23));
        assert_eq!(third.net_income, 1000.0);
    }

    #[test]
    fn future_dated_records_extend_the_horizon() {
        let mut data = sample();
        data.expenses
            .push(Expense::new(day(2024, 4, 2), ExpenseCategory::Others, 5.0));
        let buckets = aggregate(&data, Granularity::Daily, day(2024, 3, 23));
        assert_eq!(buckets.last().unwrap().start, day(2024, 4, 2));
        let counted: usize = buckets.iter().map(|b| b.expense_count).sum();
        assert_eq!(counted, 3);
    }

    #[test]
    fn empty_data_yields_single_zero_bucket() {
        let today = day(2024, 3, 23);
        let buckets = aggregate(&FinancialData::default(), Granularity::Monthly, today);
        assert_eq!(buckets.len(), 1);
        assert!(buckets[0].contains(today));
        assert_eq!(buckets[0].net, 0.0);
    }

    #[test]
    fn month_view_only_counts_that_month() {
        let mut data = sample();
        data.expenses
            .push(Expense::new(day(2024, 2, 10), ExpenseCategory::Food, 40.0));
        let buckets = aggregate_month(&data, 2024, 2).unwrap();
        assert_eq!(buckets.len(), 31);
        let expenses: f64 = buckets.iter().map(|b| b.expenses).sum();
        assert_eq!(expenses, 1000.0);
        assert_eq!(buckets[14].net_income, 850.0);
    }

    #[test]
    fn breakdown_orders_by_amount_with_percentages() {
        let shares = category_breakdown(&sample().expenses);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category, ExpenseCategory::Bills);
        assert_eq!(shares[0].amount, 700.0);
        assert!((shares[0].percentage - 70.0).abs() < 1e-9);
        assert_eq!(shares[1].category, ExpenseCategory::Food);
        assert!((shares[1].percentage - 30.0).abs() < 1e-9);
    }

    #[test]
    fn breakdown_of_zero_amounts_reports_zero_percent() {
        let date = day(2024, 1, 1);
        let expenses = vec![
            Expense::new(date, ExpenseCategory::Health, 0.0),
            Expense::new(date, ExpenseCategory::Food, 0.0),
        ];
        let shares = category_breakdown(&expenses);
        assert_eq!(shares.len(), 2);
        assert!(shares.iter().all(|share| share.percentage == 0.0));
        // equal amounts keep declaration order
        assert_eq!(shares[0].category, ExpenseCategory::Food);
    }

    #[test]
    fn spending_trend_covers_trailing_window() {
        let today = day(2024, 3, 20);
        let expenses = vec![
            Expense::new(day(2024, 3, 20), ExpenseCategory::Food, 10.0),
            Expense::new(day(2024, 3, 20), ExpenseCategory::Food, 5.0),
            Expense::new(day(2024, 3, 7), ExpenseCategory::Bills, 7.0),
            Expense::new(day(2024, 3, 6), ExpenseCategory::Bills, 99.0),
            Expense::new(day(2024, 3, 21), ExpenseCategory::Bills, 99.0),
        ];
        let points = spending_trend(&expenses, today, SPENDING_TREND_DAYS).unwrap();
        assert_eq!(points.len(), 14);
        assert_eq!(points[0].date, day(2024, 3, 7));
        assert_eq!(points[0].amount, 7.0);
        assert_eq!(points[13].label, "Mar 20");
        assert_eq!(points[13].amount, 15.0);
        let total: f64 = points.iter().map(|p| p.amount).sum();
        assert_eq!(total, 22.0);
    }

    #[test]
    fn spending_trend_rejects_windows_out_of_range() {
        let today = day(2024, 3, 20);
        assert!(matches!(spending_trend(&[], today, 0), Err(CoreError::Validation(_))));
        assert!(matches!(
            spending_trend(&[], today, u32::MAX),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(spending_trend(&[], today, MAX_SPENDING_TREND_DAYS).unwrap().len(), 366);

        let near_min = NaiveDate::MIN + Duration::days(3);
        assert!(matches!(
            spending_trend(&[], near_min, 30),
            Err(CoreError::Validation(_))
        ));
    }
}
