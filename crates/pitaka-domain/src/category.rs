//! Expense categories.

use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Closed set of expense categories, serialized by display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "Emergency Fund")]
    EmergencyFund,
    #[serde(rename = "General Savings")]
    GeneralSavings,
    #[serde(rename = "Life Insurance")]
    LifeInsurance,
    Food,
    Transportation,
    Utilities,
    Entertainment,
    Bills,
    Shopping,
    Health,
    Savings,
    Others,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 12] = [
        ExpenseCategory::EmergencyFund,
        ExpenseCategory::GeneralSavings,
        ExpenseCategory::LifeInsurance,
        ExpenseCategory::Food,
        ExpenseCategory::Transportation,
        ExpenseCategory::Utilities,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Bills,
        ExpenseCategory::Shopping,
        ExpenseCategory::Health,
        ExpenseCategory::Savings,
        ExpenseCategory::Others,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::EmergencyFund => "Emergency Fund",
            ExpenseCategory::GeneralSavings => "General Savings",
            ExpenseCategory::LifeInsurance => "Life Insurance",
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transportation => "Transportation",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Bills => "Bills",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Health => "Health",
            ExpenseCategory::Savings => "Savings",
            ExpenseCategory::Others => "Others",
        }
    }

    /// Categories whose spending is money set aside rather than consumed.
    pub fn is_savings(self) -> bool {
        matches!(
            self,
            ExpenseCategory::EmergencyFund | ExpenseCategory::GeneralSavings
        )
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown expense category `{}`", self.0)
    }
}

impl Error for ParseCategoryError {}

impl FromStr for ExpenseCategory {
    type Err = ParseCategoryError;

    /// Accepts the display label in any case, with or without separators
    /// (`"Emergency Fund"`, `"emergency-fund"`, `"emergencyfund"`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = compact(value);
        ExpenseCategory::ALL
            .into_iter()
            .find(|category| compact(category.label()) == wanted)
            .ok_or_else(|| ParseCategoryError(value.trim().to_string()))
    }
}

fn compact(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}
