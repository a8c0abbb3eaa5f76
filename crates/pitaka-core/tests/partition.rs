use chrono::{Duration, NaiveDate};
use pitaka_core::{aggregate, category_breakdown, Granularity};
use pitaka_domain::{DeductionKind, Expense, ExpenseCategory, FinancialData, IncomeEntry};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Two years of weekly paychecks and scattered expenses, with one future-dated record.
fn history() -> FinancialData {
    let start = day(2022, 11, 3);
    let income = (0..100)
        .map(|week| {
            IncomeEntry::new(start + Duration::weeks(week), 8_000.0 + week as f64)
                .with_deduction(DeductionKind::Sss, 450.0)
                .with_deduction(DeductionKind::Philhealth, 200.0)
        })
        .collect();
    let mut expenses: Vec<Expense> = (0..240)
        .map(|idx| {
            let category = ExpenseCategory::ALL[idx % ExpenseCategory::ALL.len()];
            Expense::new(start + Duration::days((idx * 3) as i64), category, 25.0 * (idx % 9) as f64)
        })
        .collect();
    expenses.push(Expense::new(day(2025, 1, 2), ExpenseCategory::Bills, 99.0));
    FinancialData::new(income, expenses)
}

#[test]
fn every_record_lands_in_exactly_one_bucket() {
    let data = history();
    let today = day(2024, 9, 30);
    for granularity in Granularity::ALL {
        let buckets = aggregate(&data, granularity, today);
        for pair in buckets.windows(2) {
            assert_eq!(pair[0].end + Duration::days(1), pair[1].start, "{granularity}");
        }
        for date in data.dates() {
            let hits = buckets.iter().filter(|b| b.contains(date)).count();
            assert_eq!(hits, 1, "{granularity} {date}");
        }
        let incomes: usize = buckets.iter().map(|b| b.income_count).sum();
        let expenses: usize = buckets.iter().map(|b| b.expense_count).sum();
        assert_eq!(incomes, data.income_history.len(), "{granularity}");
        assert_eq!(expenses, data.expenses.len(), "{granularity}");
    }
}

#[test]
fn bucket_totals_match_lifetime_totals() {
    let data = history();
    let today = day(2024, 9, 30);
    let lifetime: f64 = data.expenses.iter().map(|e| e.amount).sum();
    for granularity in Granularity::ALL {
        let buckets = aggregate(&data, granularity, today);
        let total: f64 = buckets.iter().map(|b| b.expenses).sum();
        assert!((total - lifetime).abs() < 1e-6, "{granularity}");
        for bucket in &buckets {
            assert!((bucket.net - (bucket.net_income - bucket.expenses)).abs() < 1e-9);
        }
    }
}

#[test]
fn empty_history_yields_one_bucket_per_granularity() {
    let today = day(2024, 9, 30);
    for granularity in Granularity::ALL {
        let buckets = aggregate(&FinancialData::default(), granularity, today);
        assert_eq!(buckets.len(), 1, "{granularity}");
        assert!(buckets[0].contains(today));
    }
}

#[test]
fn category_percentages_sum_to_one_hundred() {
    let shares = category_breakdown(&history().expenses);
    let total: f64 = shares.iter().map(|share| share.percentage).sum();
    assert!((total - 100.0).abs() < 1e-6);
    assert!(shares.windows(2).all(|pair| pair[0].amount >= pair[1].amount));
}
