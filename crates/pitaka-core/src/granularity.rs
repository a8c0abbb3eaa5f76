use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Temporal resolution of a bucketed series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    #[default]
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl Granularity {
    pub const ALL: [Granularity; 5] = [
        Granularity::Daily,
        Granularity::Weekly,
        Granularity::Biweekly,
        Granularity::Monthly,
        Granularity::Yearly,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Granularity::Daily => "Daily",
            Granularity::Weekly => "Weekly",
            Granularity::Biweekly => "Bi-Weekly",
            Granularity::Monthly => "Monthly",
            Granularity::Yearly => "Yearly",
        }
    }

    /// Length of a fixed-width bucket, `None` for calendar-aligned ones.
    pub fn span_days(self) -> Option<i64> {
        match self {
            Granularity::Daily => Some(1),
            Granularity::Weekly => Some(7),
            Granularity::Biweekly => Some(14),
            Granularity::Monthly | Granularity::Yearly => None,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Granularity {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(Granularity::Daily),
            "weekly" | "week" => Ok(Granularity::Weekly),
            "biweekly" | "bi-weekly" | "fortnightly" => Ok(Granularity::Biweekly),
            "monthly" | "month" => Ok(Granularity::Monthly),
            "yearly" | "year" | "annual" => Ok(Granularity::Yearly),
            other => Err(CoreError::Parse(format!(
                "unknown granularity `{other}` (expected daily, weekly, biweekly, monthly, yearly)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_view_modes() {
        assert_eq!("Bi-Weekly".parse::<Granularity>().unwrap(), Granularity::Biweekly);
        assert_eq!("yearly".parse::<Granularity>().unwrap(), Granularity::Yearly);
        assert!("hourly".parse::<Granularity>().is_err());
    }

    #[test]
    fn labels_round_trip_through_parse() {
        for granularity in Granularity::ALL {
            assert_eq!(granularity.label().parse::<Granularity>().unwrap(), granularity);
        }
    }
}
