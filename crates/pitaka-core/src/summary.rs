//! Lifetime totals behind the dashboard and analytics cards.

use std::fmt;

use pitaka_domain::{Expense, FinancialData};
use serde::Serialize;

use crate::deductions::{net_income, total_deductions};

/// Totals shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DashboardTotals {
    pub lifetime_earnings: f64,
    pub total_net_income: f64,
    pub total_deductions: f64,
    pub total_expenses: f64,
    pub total_savings: f64,
    pub wallet_balance: f64,
}

pub fn dashboard_totals(data: &FinancialData) -> DashboardTotals {
    let lifetime_earnings: f64 = data.income_history.iter().map(|e| e.gross_amount).sum();
    let total_net_income = sum_net_income(data);
    let total_deductions: f64 = data.income_history.iter().map(total_deductions).sum();
    let total_expenses = sum_expenses(&data.expenses);
    let total_savings: f64 = data
        .expenses
        .iter()
        .filter(|expense| expense.category.is_savings())
        .map(|expense| expense.amount)
        .sum();

    DashboardTotals {
        lifetime_earnings,
        total_net_income,
        total_deductions,
        total_expenses,
        total_savings,
        wallet_balance: total_net_income - total_expenses,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub total_net_income: f64,
    /// Mean take-home pay per income entry.
    pub average_net_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    pub income_count: usize,
}

pub fn analytics_summary(data: &FinancialData) -> AnalyticsSummary {
    let total_net_income = sum_net_income(data);
    let total_expenses = sum_expenses(&data.expenses);
    let income_count = data.income_history.len();
    AnalyticsSummary {
        total_net_income,
        average_net_income: total_net_income / income_count.max(1) as f64,
        total_expenses,
        net_balance: total_net_income - total_expenses,
        income_count,
    }
}

/// How much of take-home pay has been spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilizationLevel {
    Healthy,
    Elevated,
    Critical,
}

impl UtilizationLevel {
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage > 90.0 {
            UtilizationLevel::Critical
        } else if percentage > 70.0 {
            UtilizationLevel::Elevated
        } else {
            UtilizationLevel::Healthy
        }
    }
}

impl fmt::Display for UtilizationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UtilizationLevel::Healthy => "Healthy",
            UtilizationLevel::Elevated => "Elevated",
            UtilizationLevel::Critical => "Critical",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetUtilization {
    pub total_net_income: f64,
    pub total_deductions: f64,
    pub total_expenses: f64,
    /// Expenses as a share of net income, 0-100+; zero when there is no net income.
    pub utilization: f64,
    pub level: UtilizationLevel,
}

pub fn budget_utilization(data: &FinancialData) -> BudgetUtilization {
    let total_net_income = sum_net_income(data);
    let total_deductions: f64 = data.income_history.iter().map(total_deductions).sum();
    let total_expenses = sum_expenses(&data.expenses);
    let utilization = if total_net_income > 0.0 {
        total_expenses / total_net_income * 100.0
    } else {
        0.0
    };
    BudgetUtilization {
        total_net_income,
        total_deductions,
        total_expenses,
        utilization,
        level: UtilizationLevel::for_percentage(utilization),
    }
}

fn sum_net_income(data: &FinancialData) -> f64 {
    data.income_history.iter().map(net_income).sum()
}

pub(crate) fn sum_expenses(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pitaka_domain::{DeductionKind, ExpenseCategory, IncomeEntry};

    fn data() -> FinancialData {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        FinancialData::new(
            vec![
                IncomeEntry::new(date, 1000.0)
                    .with_deduction(DeductionKind::Sss, 100.0)
                    .with_deduction(DeductionKind::Pagibig, 50.0),
                IncomeEntry::new(date, 2000.0).with_deduction(DeductionKind::Vul, 150.0),
            ],
            vec![
                Expense::new(date, ExpenseCategory::Food, 300.0),
                Expense::new(date, ExpenseCategory::EmergencyFund, 500.0),
                Expense::new(date, ExpenseCategory::GeneralSavings, 200.0),
                Expense::new(date, ExpenseCategory::Savings, 50.0),
            ],
        )
    }

    #[test]
    fn dashboard_counts_only_fund_categories_as_savings() {
        let totals = dashboard_totals(&data());
        assert_eq!(totals.lifetime_earnings, 3000.0);
        assert_eq!(totals.total_deductions, 300.0);
        assert_eq!(totals.total_net_income, 2700.0);
        assert_eq!(totals.total_expenses, 1050.0);
        assert_eq!(totals.total_savings, 700.0);
        assert_eq!(totals.wallet_balance, 1650.0);
    }

    #[test]
    fn analytics_average_guards_empty_history() {
        let summary = analytics_summary(&data());
        assert_eq!(summary.average_net_income, 1350.0);
        assert_eq!(summary.net_balance, 1650.0);

        let empty = analytics_summary(&FinancialData::default());
        assert_eq!(empty.average_net_income, 0.0);
        assert_eq!(empty.income_count, 0);
    }

    #[test]
    fn utilization_levels_follow_thresholds() {
        assert_eq!(UtilizationLevel::for_percentage(70.0), UtilizationLevel::Healthy);
        assert_eq!(UtilizationLevel::for_percentage(70.5), UtilizationLevel::Elevated);
        assert_eq!(UtilizationLevel::for_percentage(90.0), UtilizationLevel::Elevated);
        assert_eq!(UtilizationLevel::for_percentage(120.0), UtilizationLevel::Critical);
    }

    #[test]
    fn utilization_is_zero_without_net_income() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let spending_only = FinancialData::new(
            Vec::new(),
            vec![Expense::new(date, ExpenseCategory::Bills, 10.0)],
        );
        let usage = budget_utilization(&spending_only);
        assert_eq!(usage.utilization, 0.0);
        assert_eq!(usage.level, UtilizationLevel::Healthy);

        let usage = budget_utilization(&data());
        assert!((usage.utilization - 1050.0 / 2700.0 * 100.0).abs() < 1e-9);
    }
}
