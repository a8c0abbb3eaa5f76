//! The per-user collection of records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{common::Dated, expense::Expense, income::IncomeEntry, record_id::RecordId};

/// Unordered income and expense records belonging to one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialData {
    #[serde(default)]
    pub income_history: Vec<IncomeEntry>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl FinancialData {
    pub fn new(income_history: Vec<IncomeEntry>, expenses: Vec<Expense>) -> Self {
        Self {
            income_history,
            expenses,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.income_history.is_empty() && self.expenses.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.income_history.len() + self.expenses.len()
    }

    /// Every record date, income first.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.income_history
            .iter()
            .map(|entry| entry.date())
            .chain(self.expenses.iter().map(|expense| expense.date()))
    }

    pub fn earliest_date(&self) -> Option<NaiveDate> {
        self.dates().min()
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.dates().max()
    }

    pub fn income(&self, id: &RecordId) -> Option<&IncomeEntry> {
        self.income_history.iter().find(|entry| &entry.id == id)
    }

    pub fn expense(&self, id: &RecordId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| &expense.id == id)
    }
}
