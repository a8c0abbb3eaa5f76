//! Presentation helpers for amounts and bucket labels.

use chrono::NaiveDate;

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64) -> String;
}

/// Formats amounts as `₱1,234.56` / `-₱1,234.56` (symbol, grouping, and precision
/// follow the currency code).
#[derive(Debug, Clone, PartialEq)]
pub struct MoneyFormatter {
    code: String,
    symbol: String,
    precision: u8,
    decimal_separator: char,
    grouping_separator: char,
}

impl MoneyFormatter {
    pub fn for_currency(code: &str) -> Self {
        let code = code.trim().to_uppercase();
        Self {
            symbol: symbol_for(&code),
            precision: minor_units_for(&code),
            code,
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }

    /// Currency formatting with the separators of a locale tag such as `de-DE`.
    pub fn for_locale(code: &str, locale: &str) -> Self {
        let (decimal, grouping) = separators_for_locale(locale);
        Self::for_currency(code).with_separators(decimal, grouping)
    }

    pub fn with_separators(mut self, decimal: char, grouping: char) -> Self {
        self.decimal_separator = decimal;
        self.grouping_separator = grouping;
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    fn format_number(&self, value: f64) -> String {
        let body = format!("{:.*}", self.precision as usize, value);
        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (body.as_str(), None),
        };
        let mut out = group_digits(int_part, self.grouping_separator);
        if let Some(frac) = frac_part {
            out.push(self.decimal_separator);
            out.push_str(frac);
        }
        out
    }
}

impl Default for MoneyFormatter {
    fn default() -> Self {
        Self::for_currency("PHP")
    }
}

impl CurrencyFormatter for MoneyFormatter {
    fn format_amount(&self, amount: f64) -> String {
        let body = self.format_number(amount.abs());
        let scale = 10f64.powi(self.precision as i32);
        let negative = amount < 0.0 && (amount.abs() * scale).round() > 0.0;
        if negative {
            format!("-{}{}", self.symbol, body)
        } else {
            format!("{}{}", self.symbol, body)
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "PHP" => "₱".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        _ => format!("{code} "),
    }
}

/// Decimal and grouping separators for a locale tag. Unknown tags get `.` and `,`.
pub fn separators_for_locale(locale: &str) -> (char, char) {
    let tag = locale.trim().replace('_', "-").to_ascii_lowercase();
    let (language, region) = tag.split_once('-').unwrap_or((tag.as_str(), ""));
    match (language, region) {
        ("de" | "it" | "fr", "ch") => ('.', '\''),
        ("de" | "es" | "it" | "nl" | "pt" | "id" | "tr" | "da" | "el", _) => (',', '.'),
        ("fr" | "ru" | "pl" | "cs" | "sv" | "nb" | "fi" | "uk", _) => (',', ' '),
        _ => ('.', ','),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" | "KRW" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Formats a percentage already scaled to 0-100 as `30.0%`.
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// `Mar 15`
pub fn short_day(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// `Mar 15, 2024`
pub fn short_day_with_year(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `March 15, 2024`
pub fn long_day(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_pesos_with_grouping() {
        let fmt = MoneyFormatter::default();
        assert_eq!(fmt.format_amount(1234.5), "₱1,234.50");
        assert_eq!(fmt.format_amount(0.0), "₱0.00");
        assert_eq!(fmt.format_amount(1_000_000.0), "₱1,000,000.00");
    }

    #[test]
    fn negative_amounts_lead_with_sign() {
        let fmt = MoneyFormatter::default();
        assert_eq!(fmt.format_amount(-850.0), "-₱850.00");
        assert_eq!(fmt.format_amount(-0.001), "₱0.00");
    }

    #[test]
    fn honours_currency_precision_and_separators() {
        let yen = MoneyFormatter::for_currency("jpy");
        assert_eq!(yen.format_amount(1234.4), "¥1,234");
        let euro = MoneyFormatter::for_currency("EUR").with_separators(',', '.');
        assert_eq!(euro.format_amount(1234.5), "€1.234,50");
    }

    #[test]
    fn locale_picks_separators() {
        assert_eq!(separators_for_locale("en-PH"), ('.', ','));
        assert_eq!(separators_for_locale("de_DE"), (',', '.'));
        assert_eq!(separators_for_locale("fr-FR"), (',', ' '));
        assert_eq!(separators_for_locale("de-CH"), ('.', '\''));
        assert_eq!(separators_for_locale("xx"), ('.', ','));
        let fmt = MoneyFormatter::for_locale("PHP", "de-DE");
        assert_eq!(fmt.format_amount(-1234.5), "-₱1.234,50");
    }

    #[test]
    fn day_labels() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(short_day(date), "Mar 5");
        assert_eq!(short_day_with_year(date), "Mar 5, 2024");
        assert_eq!(long_day(date), "March 5, 2024");
    }
}
