//! Weekday occurrence counting over date ranges.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::order::OrderRecord;
use crate::orders::rules::timestamps::WEEKDAYS_FROM_SUNDAY;

/// Count how often each weekday occurs in `start..=end`, Sunday first.
///
/// An inverted range counts nothing.
pub fn count_weekdays(start: NaiveDate, end: NaiveDate) -> Vec<(Weekday, u32)> {
    let mut counts: Vec<(Weekday, u32)> = WEEKDAYS_FROM_SUNDAY.iter().map(|d| (*d, 0)).collect();

    for date in start.iter_days().take_while(|d| *d <= end) {
        let slot = date.weekday().num_days_from_sunday() as usize;
        counts[slot].1 += 1;
    }

    counts
}

/// First and last order date among records with a timestamp.
pub fn order_date_span(records: &[OrderRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = records.iter().filter_map(|r| r.ordered_at.map(|t| t.date()));
    let first = dates.next()?;

    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}
