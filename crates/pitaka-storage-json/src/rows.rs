//! On-disk row shapes. Columns mirror the hosted `income_history` and
//! `expenses` tables so documents can be imported there unchanged.

use pitaka_core::{validation::parse_record_date, CoreError, IdMapping};
use pitaka_domain::{Deductions, Expense, ExpenseCategory, IncomeEntry, RecordId};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRow {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub weekly_salary: f64,
    #[serde(default)]
    pub sss: f64,
    #[serde(default)]
    pub pagibig: f64,
    #[serde(default)]
    pub philhealth: f64,
    #[serde(default)]
    pub vul: f64,
    #[serde(default)]
    pub emergency_fund: f64,
    #[serde(default)]
    pub general_savings: f64,
}

impl IncomeRow {
    pub fn from_entry(entry: &IncomeEntry, owner: &str) -> Self {
        let d = &entry.deductions;
        Self {
            id: entry.id.to_string(),
            user_id: owner.to_string(),
            date: entry.date.format(DATE_FORMAT).to_string(),
            weekly_salary: entry.gross_amount,
            sss: d.sss,
            pagibig: d.pagibig,
            philhealth: d.philhealth,
            vul: d.vul,
            emergency_fund: d.emergency_fund,
            general_savings: d.general_savings,
        }
    }

    pub fn into_entry(self) -> Result<IncomeEntry, CoreError> {
        Ok(IncomeEntry {
            id: RecordId::new(self.id),
            date: parse_record_date(&self.date)?,
            gross_amount: self.weekly_salary,
            deductions: Deductions {
                sss: self.sss,
                pagibig: self.pagibig,
                philhealth: self.philhealth,
                vul: self.vul,
                emergency_fund: self.emergency_fund,
                general_savings: self.general_savings,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl ExpenseRow {
    pub fn from_expense(expense: &Expense, owner: &str) -> Self {
        Self {
            id: expense.id.to_string(),
            user_id: owner.to_string(),
            date: expense.date.format(DATE_FORMAT).to_string(),
            category: expense.category.label().to_string(),
            amount: expense.amount,
            description: Some(expense.description.clone()),
        }
    }

    pub fn into_expense(self) -> Result<Expense, CoreError> {
        let category: ExpenseCategory = self
            .category
            .parse()
            .map_err(|err| CoreError::Parse(format!("expense {}: {err}", self.id)))?;
        Ok(Expense {
            id: RecordId::new(self.id),
            date: parse_record_date(&self.date)?,
            category,
            amount: self.amount,
            description: self.description.unwrap_or_default(),
        })
    }
}

/// The per-owner document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub income_history: Vec<IncomeRow>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRow>,
}

impl StoreDocument {
    pub fn upsert_income(&mut self, row: IncomeRow) {
        match self.income_history.iter_mut().find(|existing| existing.id == row.id) {
            Some(existing) => *existing = row,
            None => self.income_history.push(row),
        }
    }

    /// Drops rows stored under ids the mapping replaced. Returns how many went.
    pub fn retire(&mut self, mapping: &IdMapping) -> usize {
        let before = self.income_history.len() + self.expenses.len();
        self.income_history
            .retain(|row| !mapping.income.iter().any(|pair| pair.old_id.as_str() == row.id));
        self.expenses
            .retain(|row| !mapping.expenses.iter().any(|pair| pair.old_id.as_str() == row.id));
        before - (self.income_history.len() + self.expenses.len())
    }

    pub fn upsert_expense(&mut self, row: ExpenseRow) {
        match self.expenses.iter_mut().find(|existing| existing.id == row.id) {
            Some(existing) => *existing = row,
            None => self.expenses.push(row),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pitaka_domain::DeductionKind;

    #[test]
    fn income_row_uses_table_column_names() {
        let entry = IncomeEntry::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), 1000.0)
            .with_id("abc123")
            .with_deduction(DeductionKind::Sss, 100.0);
        let value = serde_json::to_value(IncomeRow::from_entry(&entry, "maria")).unwrap();
        assert_eq!(value["weekly_salary"], 1000.0);
        assert_eq!(value["sss"], 100.0);
        assert_eq!(value["date"], "2024-03-15");
        assert_eq!(value["user_id"], "maria");
    }

    #[test]
    fn missing_optional_columns_default_to_zero() {
        let row: IncomeRow = serde_json::from_str(
            r#"{"id":"a","user_id":"u","date":"2024-01-05","weekly_salary":500}"#,
        )
        .unwrap();
        let entry = row.into_entry().unwrap();
        assert_eq!(entry.deductions, Deductions::default());

        let row: ExpenseRow = serde_json::from_str(
            r#"{"id":"b","user_id":"u","date":"2024-01-05","category":"Food","amount":12.5,"description":null}"#,
        )
        .unwrap();
        let expense = row.into_expense().unwrap();
        assert_eq!(expense.description, "");
        assert_eq!(expense.category, ExpenseCategory::Food);
    }

    #[test]
    fn bad_dates_fail_fast() {
        let row = ExpenseRow {
            id: "c".into(),
            user_id: "u".into(),
            date: "03/15/2024".into(),
            category: "Bills".into(),
            amount: 1.0,
            description: None,
        };
        assert!(matches!(row.into_expense(), Err(CoreError::InvalidDate(_))));
    }
}
