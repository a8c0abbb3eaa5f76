//! Shell command handlers grouped by area, plus the argument helpers they share.

mod analytics;
mod config;
mod expense;
mod income;
mod sync;
mod system;

use chrono::NaiveDate;
use pitaka_core::{validation::parse_record_date, CoreError, RecordKind};
use pitaka_domain::{Identifiable, RecordId};

use crate::cli::error::CommandError;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

/// Every shell command, in help order.
pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut entries = system::definitions();
    entries.extend(income::definitions());
    entries.extend(expense::definitions());
    entries.extend(analytics::definitions());
    entries.extend(sync::definitions());
    entries.extend(config::definitions());
    entries
}

/// `YYYY-MM-DD` or `today`.
pub(crate) fn parse_date(context: &ShellContext, raw: &str) -> Result<NaiveDate, CommandError> {
    if raw.eq_ignore_ascii_case("today") {
        return Ok(context.today());
    }
    Ok(parse_record_date(raw)?)
}

/// Splits `key=value` arguments; anything else is positional.
pub(crate) fn split_options<'a>(args: &[&'a str]) -> (Vec<&'a str>, Vec<(String, &'a str)>) {
    let mut positional = Vec::new();
    let mut options = Vec::new();
    for arg in args {
        match arg.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                options.push((key.trim().to_ascii_lowercase().replace('-', "_"), value));
            }
            _ => positional.push(*arg),
        }
    }
    (positional, options)
}

/// The single record whose id starts with `prefix` (case-insensitive).
pub(crate) fn resolve_record<'a, T: Identifiable>(
    kind: RecordKind,
    prefix: &str,
    records: &'a [T],
) -> Result<&'a T, CommandError> {
    let needle = prefix.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Err(CommandError::InvalidArguments(format!(
            "{kind} id cannot be empty"
        )));
    }
    let mut matches = records
        .iter()
        .filter(|record| record.id().as_str().to_ascii_lowercase().starts_with(&needle));
    match (matches.next(), matches.count()) {
        (Some(record), 0) => Ok(record),
        (None, _) => Err(CoreError::RecordNotFound {
            kind,
            id: RecordId::new(prefix.trim()),
        }
        .into()),
        (Some(_), others) => Err(CommandError::InvalidArguments(format!(
            "`{prefix}` matches {} records; use more characters of the id",
            others + 1
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitaka_domain::IncomeEntry;

    #[test]
    fn options_are_normalized() {
        let (positional, options) =
            split_options(&["2024-03-15", "1000", "Emergency-Fund=200", "=x"]);
        assert_eq!(positional, vec!["2024-03-15", "1000", "=x"]);
        assert_eq!(options, vec![("emergency_fund".to_string(), "200")]);
    }

    #[test]
    fn id_prefixes_must_be_unique() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let entries = [
            IncomeEntry::new(date, 10.0).with_id("0b8a4f7e-aaaa"),
            IncomeEntry::new(date, 20.0).with_id("0b8a9999-bbbb"),
        ];
        let found = resolve_record(RecordKind::Income, "0B8A4", &entries).unwrap();
        assert_eq!(found.gross_amount, 10.0);
        assert!(matches!(
            resolve_record(RecordKind::Income, "0b8a", &entries),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            resolve_record(RecordKind::Income, "ffff", &entries),
            Err(CommandError::Core(CoreError::RecordNotFound { .. }))
        ));
    }
}
