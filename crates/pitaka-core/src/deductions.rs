use pitaka_domain::IncomeEntry;

/// Sum of every withholding on the entry.
pub fn total_deductions(entry: &IncomeEntry) -> f64 {
    entry.deductions.iter().map(|(_, amount)| amount).sum()
}

/// Take-home pay, floored at zero when withholdings exceed gross.
pub fn net_income(entry: &IncomeEntry) -> f64 {
    (entry.gross_amount - total_deductions(entry)).max(0.0)
}
