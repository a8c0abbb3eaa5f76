//! Boundary checks for values entering the engine from text (storage rows, shell input).

use chrono::NaiveDate;
use pitaka_domain::{Expense, IncomeEntry};

use crate::CoreError;

/// Parses a strict `YYYY-MM-DD` calendar day.
pub fn parse_record_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = raw.trim();
    let well_formed = trimmed.len() == 10
        && trimmed.char_indices().all(|(idx, ch)| match idx {
            4 | 7 => ch == '-',
            _ => ch.is_ascii_digit(),
        });
    if !well_formed {
        return Err(CoreError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| CoreError::InvalidDate(raw.to_string()))
}

/// Parses a non-negative decimal amount.
pub fn parse_amount(raw: &str, field: &str) -> Result<f64, CoreError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| *ch != ',' && *ch != '_')
        .collect();
    let value: f64 = cleaned
        .parse()
        .map_err(|_| CoreError::Parse(format!("{field} must be a number, got `{raw}`")))?;
    ensure_amount(value, field)?;
    Ok(value)
}

pub fn validate_income(entry: &IncomeEntry) -> Result<(), CoreError> {
    ensure_amount(entry.gross_amount, "gross amount")?;
    for (kind, amount) in entry.deductions.iter() {
        ensure_amount(amount, kind.label())?;
    }
    Ok(())
}

pub fn validate_expense(expense: &Expense) -> Result<(), CoreError> {
    ensure_amount(expense.amount, "amount")
}

fn ensure_amount(value: f64, field: &str) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation(format!("{field} must be finite")));
    }
    if value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{field} cannot be negative ({value})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitaka_domain::{DeductionKind, ExpenseCategory};

    #[test]
    fn accepts_iso_days() {
        let date = parse_record_date("2024-03-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert!(parse_record_date(" 2024-02-29 ").is_ok());
    }

    #[test]
    fn rejects_malformed_days() {
        for raw in ["2024-3-15", "15/03/2024", "2023-02-29", "2024-13-01", "", "yesterday"] {
            let err = parse_record_date(raw).unwrap_err();
            assert!(matches!(err, CoreError::InvalidDate(_)), "{raw}: {err}");
        }
    }

    #[test]
    fn parses_grouped_amounts() {
        assert_eq!(parse_amount("1,250.50", "gross").unwrap(), 1250.5);
        assert!(matches!(
            parse_amount("-5", "amount"),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(parse_amount("abc", "amount"), Err(CoreError::Parse(_))));
    }

    #[test]
    fn rejects_negative_deductions_and_amounts() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let entry = IncomeEntry::new(date, 1000.0).with_deduction(DeductionKind::Vul, -1.0);
        assert!(validate_income(&entry).is_err());
        let expense = Expense::new(date, ExpenseCategory::Food, f64::NAN);
        assert!(validate_expense(&expense).is_err());
    }
}
