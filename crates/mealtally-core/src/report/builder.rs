//! Filtered, sorted item reports over order records.

use chrono::Weekday;
use tracing::debug;

use super::SortKey;
use super::aggregate::{ReportRow, aggregate};
use crate::models::order::{MealType, OrderRecord};

/// Builds an aggregated item report from order records.
///
/// Filters combine with AND semantics. A record whose weekday or meal type is
/// absent never matches a filter on that field.
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    weekday: Option<Weekday>,
    meal_type: Option<MealType>,
    sort: SortKey,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only orders placed on this weekday.
    pub fn weekday(mut self, weekday: Option<Weekday>) -> Self {
        self.weekday = weekday;
        self
    }

    /// Keep only orders of this meal type.
    pub fn meal_type(mut self, meal_type: Option<MealType>) -> Self {
        self.meal_type = meal_type;
        self
    }

    pub fn sort_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Whether a record passes the filters.
    pub fn matches(&self, record: &OrderRecord) -> bool {
        let day_ok = self.weekday.is_none_or(|d| record.weekday == Some(d));
        let meal_ok = self.meal_type.is_none_or(|m| record.meal_type == Some(m));
        day_ok && meal_ok
    }

    pub fn build(&self, records: &[OrderRecord]) -> Vec<ReportRow> {
        let matching: Vec<&OrderRecord> = records.iter().filter(|r| self.matches(r)).collect();
        let bucket = aggregate(matching.iter().flat_map(|r| r.items.iter()));

        debug!(
            "Report {:?}/{:?}: {} of {} orders, {} distinct items",
            self.weekday,
            self.meal_type,
            matching.len(),
            records.len(),
            bucket.len()
        );

        bucket.into_sorted(self.sort)
    }
}

/// Aggregate the items of all records matching the filters, ordered by
/// `sort_key`.
pub fn build_report(
    records: &[OrderRecord],
    weekday_filter: Option<Weekday>,
    meal_type_filter: Option<MealType>,
    sort_key: SortKey,
) -> Vec<ReportRow> {
    ReportBuilder::new()
        .weekday(weekday_filter)
        .meal_type(meal_type_filter)
        .sort_by(sort_key)
        .build(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::ItemLine;
    use chrono::{NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        // August 2023: the 16th is a Wednesday
        NaiveDate::from_ymd_opt(2023, 8, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn record(d: u32, h: u32, items: &[(&str, u64)]) -> OrderRecord {
        OrderRecord::new(
            None,
            Some(at(d, h)),
            items.iter().map(|(n, q)| ItemLine::new(*n, *q)).collect(),
        )
    }

    #[test]
    fn test_wednesday_lunch_union() {
        let records = vec![
            record(16, 13, &[("Tawa Paratha", 1), ("Dal Tadka", 1)]),
            record(16, 12, &[("Tawa Paratha", 2), ("Anda Curry", 1)]),
            record(16, 20, &[("Tawa Paratha", 9)]),
            record(17, 13, &[("Tawa Paratha", 9)]),
        ];

        let report = build_report(
            &records,
            Some(Weekday::Wed),
            Some(MealType::Lunch),
            SortKey::Name,
        );

        assert_eq!(
            report,
            vec![
                ReportRow::new("Anda Curry", 1),
                ReportRow::new("Dal Tadka", 1),
                ReportRow::new("Tawa Paratha", 3),
            ]
        );
    }

    #[test]
    fn test_no_filters_uses_everything() {
        let records = vec![
            record(16, 13, &[("Lassi", 1)]),
            OrderRecord::new(None, None, vec![ItemLine::new("Lassi", 4)]),
        ];

        let report = build_report(&records, None, None, SortKey::QuantityDesc);
        assert_eq!(report, vec![ReportRow::new("Lassi", 5)]);
    }

    #[test]
    fn test_absent_weekday_never_matches_filter() {
        let records = vec![OrderRecord::new(None, None, vec![ItemLine::new("Lassi", 4)])];

        let report = ReportBuilder::new().weekday(Some(Weekday::Wed)).build(&records);
        assert!(report.is_empty());
    }

    #[test]
    fn test_quantity_desc_tie_break() {
        let records = vec![record(16, 20, &[("B", 2), ("A", 2), ("C", 3)])];

        let report = ReportBuilder::new()
            .sort_by(SortKey::QuantityDesc)
            .build(&records);

        let names: Vec<_> = report.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }
}
