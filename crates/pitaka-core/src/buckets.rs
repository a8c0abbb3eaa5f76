//! Date-bucket construction.
//!
//! A series covers `[earliest, horizon]` with contiguous, non-overlapping buckets.
//! `earliest` is the oldest record date (today when there are no records) and
//! `horizon` is today, pushed forward to the newest record when something is
//! dated in the future, so every record falls inside exactly one bucket.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use pitaka_domain::FinancialData;
use serde::Serialize;

use crate::{
    format::{long_day, short_day, short_day_with_year},
    CoreError, Granularity,
};

/// Day the weekly and bi-weekly grids are aligned to.
pub const WEEK_START: Weekday = Weekday::Sun;

/// A labeled aggregation window and the totals of the records inside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateBucket {
    pub label: String,
    pub date_range: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub net_income: f64,
    pub expenses: f64,
    pub net: f64,
    pub income_count: usize,
    pub expense_count: usize,
}

impl DateBucket {
    fn empty(label: String, date_range: String, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            label,
            date_range,
            start,
            end,
            net_income: 0.0,
            expenses: 0.0,
            net: 0.0,
            income_count: 0,
            expense_count: 0,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The inclusive day range a series must cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketSpan {
    pub earliest: NaiveDate,
    pub horizon: NaiveDate,
}

impl BucketSpan {
    pub fn for_data(data: &FinancialData, today: NaiveDate) -> Self {
        let earliest = data.earliest_date().unwrap_or(today);
        let horizon = data.latest_date().map_or(today, |latest| latest.max(today));
        Self { earliest, horizon }
    }
}

/// Builds the empty bucket grid for `granularity` over `span`.
///
/// Always returns at least one bucket.
pub fn build_buckets(granularity: Granularity, span: BucketSpan) -> Vec<DateBucket> {
    match granularity.span_days() {
        Some(1) => daily_buckets(span.earliest, span.horizon),
        Some(width) => fixed_width_buckets(span, width),
        None if granularity == Granularity::Monthly => monthly_buckets(span),
        None => yearly_buckets(span),
    }
}

/// One daily bucket for every day of a single month. `month_index` is 0-based.
pub fn month_buckets(year: i32, month_index: u32) -> Result<Vec<DateBucket>, CoreError> {
    if month_index > 11 {
        return Err(CoreError::Validation(format!(
            "month index must be between 0 and 11, got {month_index}"
        )));
    }
    let first = NaiveDate::from_ymd_opt(year, month_index + 1, 1)
        .ok_or_else(|| CoreError::Validation(format!("year {year} is out of range")))?;
    Ok(daily_buckets(first, last_day_of_month(first)))
}

/// Index of the bucket containing `date`. Buckets must be sorted and disjoint.
pub fn locate(buckets: &[DateBucket], date: NaiveDate) -> Option<usize> {
    let idx = buckets.partition_point(|bucket| bucket.end < date);
    buckets
        .get(idx)
        .filter(|bucket| bucket.contains(date))
        .map(|_| idx)
}

/// First day of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset =
        (date.weekday().num_days_from_monday() + 7 - WEEK_START.num_days_from_monday()) % 7;
    date - Duration::days(offset as i64)
}

fn daily_buckets(first: NaiveDate, last: NaiveDate) -> Vec<DateBucket> {
    first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|day| DateBucket::empty(short_day(day), long_day(day), day, day))
        .collect()
}

fn fixed_width_buckets(span: BucketSpan, width: i64) -> Vec<DateBucket> {
    let mut buckets = Vec::new();
    let mut start = week_start(span.earliest);
    while start <= span.horizon {
        let end = (start + Duration::days(width - 1)).min(span.horizon);
        let date_range = format!("{} – {}", short_day(start), short_day_with_year(end));
        buckets.push(DateBucket::empty(short_day(start), date_range, start, end));
        start += Duration::days(width);
    }
    buckets
}

fn monthly_buckets(span: BucketSpan) -> Vec<DateBucket> {
    let mut buckets = Vec::new();
    let mut start = first_of_month(span.earliest);
    while start <= span.horizon {
        let end = last_day_of_month(start);
        let label = start.format("%b %y").to_string();
        let date_range = format!(
            "{} 1 – {}, {}",
            start.format("%B"),
            end.day(),
            start.year()
        );
        buckets.push(DateBucket::empty(label, date_range, start, end));
        start = end + Duration::days(1);
    }
    buckets
}

fn yearly_buckets(span: BucketSpan) -> Vec<DateBucket> {
    (span.earliest.year()..=span.horizon.year())
        .filter_map(|year| {
            let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
            let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
            let date_range = format!("January 1 – December 31, {year}");
            Some(DateBucket::empty(year.to_string(), date_range, start, end))
        })
        .collect()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    // 32 days past the 1st always lands in the following month.
    let next = first_of_month(first + Duration::days(32));
    next - Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn span(earliest: NaiveDate, horizon: NaiveDate) -> BucketSpan {
        BucketSpan { earliest, horizon }
    }

    fn assert_contiguous(buckets: &[DateBucket]) {
        for pair in buckets.windows(2) {
            assert_eq!(pair[0].end + Duration::days(1), pair[1].start);
        }
    }

    #[test]
    fn fixed_width_grids_use_the_granularity_span() {
        let grid = span(day(2024, 1, 7), day(2024, 3, 27));
        for granularity in [Granularity::Weekly, Granularity::Biweekly] {
            let width = granularity.span_days().unwrap();
            let buckets = build_buckets(granularity, grid);
            let (last, full) = buckets.split_last().unwrap();
            assert!(full
                .iter()
                .all(|bucket| (bucket.end - bucket.start).num_days() + 1 == width));
            assert!((last.end - last.start).num_days() < width);
            assert_contiguous(&buckets);
        }
    }

    #[test]
    fn daily_grid_includes_both_ends() {
        let buckets = build_buckets(Granularity::Daily, span(day(2024, 2, 27), day(2024, 3, 2)));
        assert_eq!(buckets.len(), 5);
        assert_eq!(buckets[2].start, day(2024, 2, 29));
        assert_eq!(buckets[2].label, "Feb 29");
        assert_eq!(buckets[2].date_range, "February 29, 2024");
        assert_contiguous(&buckets);
    }

    #[test]
    fn weekly_grid_aligns_to_sunday_and_clamps_to_horizon() {
        // 2024-03-15 is a Friday; its week starts Sunday 2024-03-10.
        let buckets = build_buckets(Granularity::Weekly, span(day(2024, 3, 15), day(2024, 3, 20)));
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].start, day(2024, 3, 10));
        assert_eq!(buckets[0].end, day(2024, 3, 16));
        assert_eq!(buckets[0].date_range, "Mar 10 – Mar 16, 2024");
        assert_eq!(buckets[1].start, day(2024, 3, 17));
        assert_eq!(buckets[1].end, day(2024, 3, 20));
        assert_eq!(buckets[1].label, "Mar 17");
    }

    #[test]
    fn biweekly_grid_uses_fourteen_day_windows() {
        let buckets =
            build_buckets(Granularity::Biweekly, span(day(2024, 1, 3), day(2024, 2, 20)));
        assert_eq!(buckets[0].start, day(2023, 12, 31));
        assert_eq!(buckets[0].end, day(2024, 1, 13));
        assert!(buckets
            .iter()
            .take(buckets.len() - 1)
            .all(|b| (b.end - b.start).num_days() == 13));
        assert_eq!(buckets.last().unwrap().end, day(2024, 2, 20));
        assert_contiguous(&buckets);
    }

    #[test]
    fn monthly_grid_spans_whole_months() {
        let buckets =
            build_buckets(Granularity::Monthly, span(day(2023, 11, 20), day(2024, 2, 10)));
        let labels: Vec<_> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Nov 23", "Dec 23", "Jan 24", "Feb 24"]);
        assert_eq!(buckets[0].start, day(2023, 11, 1));
        assert_eq!(buckets[3].end, day(2024, 2, 29));
        assert_eq!(buckets[3].date_range, "February 1 – 29, 2024");
        assert_contiguous(&buckets);
    }

    #[test]
    fn yearly_grid_covers_each_calendar_year() {
        let buckets = build_buckets(Granularity::Yearly, span(day(2022, 6, 1), day(2024, 1, 5)));
        let labels: Vec<_> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["2022", "2023", "2024"]);
        assert_eq!(buckets[1].date_range, "January 1 – December 31, 2023");
    }

    #[test]
    fn single_day_span_yields_one_bucket_for_every_granularity() {
        let today = day(2024, 3, 20);
        let span = BucketSpan::for_data(&FinancialData::default(), today);
        assert_eq!(span.earliest, today);
        assert_eq!(span.horizon, today);
        for granularity in Granularity::ALL {
            let buckets = build_buckets(granularity, span);
            assert_eq!(buckets.len(), 1, "{granularity}");
            assert!(buckets[0].contains(today));
        }
    }

    #[test]
    fn locate_finds_containing_bucket() {
        let buckets = build_buckets(Granularity::Weekly, span(day(2024, 3, 1), day(2024, 3, 31)));
        let idx = locate(&buckets, day(2024, 3, 15)).unwrap();
        assert!(buckets[idx].contains(day(2024, 3, 15)));
        assert_eq!(locate(&buckets, day(2024, 4, 1)), None);
        assert_eq!(locate(&buckets, day(2024, 2, 1)), None);
    }

    #[test]
    fn month_drill_down_lists_every_day() {
        let buckets = month_buckets(2024, 1).unwrap();
        assert_eq!(buckets.len(), 29);
        assert_eq!(buckets[0].start, day(2024, 2, 1));
        assert!(month_buckets(2024, 12).is_err());
    }

    #[test]
    fn week_start_is_identity_on_sundays() {
        assert_eq!(week_start(day(2024, 3, 10)), day(2024, 3, 10));
        assert_eq!(week_start(day(2024, 3, 16)), day(2024, 3, 10));
    }
}
