use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{category::ExpenseCategory, common::*, record_id::RecordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: RecordId,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

impl Expense {
    pub fn new(date: NaiveDate, category: ExpenseCategory, amount: f64) -> Self {
        Self {
            id: RecordId::generate(),
            date,
            category,
            amount,
            description: String::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Identifiable for Expense {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Dated for Expense {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        if self.description.is_empty() {
            format!("{} on {}", self.category, self.date)
        } else {
            format!("{} on {} ({})", self.category, self.date, self.description)
        }
    }
}
