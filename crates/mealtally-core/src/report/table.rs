//! Report tables: a header row plus string data rows, ready for a tabular
//! sink.

use chrono::Weekday;

use super::builder::ReportBuilder;
use super::aggregate::aggregate;
use super::SortKey;
use crate::models::order::{MealType, OrderRecord};
use crate::orders::rules::weekday_name;

/// Tabular report output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Items ordered on one weekday: `Item, Quantity, Ordered Day`.
    pub fn weekday(records: &[OrderRecord], day: Weekday, sort: SortKey) -> Self {
        let mut table = Self::new(&["Item", "Quantity", "Ordered Day"]);
        let rows = ReportBuilder::new().weekday(Some(day)).sort_by(sort).build(records);

        for row in rows {
            table.push_row(vec![row.item, row.quantity.to_string(), weekday_name(day).to_string()]);
        }
        table
    }

    /// Items ordered on one weekday for one meal type: `Item, Quantity`.
    pub fn weekday_meal(
        records: &[OrderRecord],
        day: Weekday,
        meal: MealType,
        sort: SortKey,
    ) -> Self {
        let mut table = Self::new(&["Item", "Quantity"]);
        let rows = ReportBuilder::new()
            .weekday(Some(day))
            .meal_type(Some(meal))
            .sort_by(sort)
            .build(records);

        for row in rows {
            table.push_row(vec![row.item, row.quantity.to_string()]);
        }
        table
    }

    /// Items per order, merged within each order only:
    /// `item_name, item_quantity, week_day`.
    pub fn per_order(records: &[OrderRecord]) -> Self {
        let mut table = Self::new(&["item_name", "item_quantity", "week_day"]);

        for record in records {
            let day = record.weekday.map(weekday_name).unwrap_or_default();
            for row in aggregate(&record.items).rows() {
                table.push_row(vec![row.item.clone(), row.quantity.to_string(), day.to_string()]);
            }
        }
        table
    }

    /// Items across all records: `item_name, item_quantity`.
    pub fn totals(records: &[OrderRecord], sort: SortKey) -> Self {
        let mut table = Self::new(&["item_name", "item_quantity"]);

        for row in ReportBuilder::new().sort_by(sort).build(records) {
            table.push_row(vec![row.item, row.quantity.to_string()]);
        }
        table
    }

    /// Weekday occurrence counts: `Day, Count`.
    pub fn day_counts(counts: &[(Weekday, u32)]) -> Self {
        let mut table = Self::new(&["Day", "Count"]);

        for (day, count) in counts {
            table.push_row(vec![weekday_name(*day).to_string(), count.to_string()]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::ItemLine;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn wednesday_dinner(items: &[(&str, u64)]) -> OrderRecord {
        let ts = NaiveDate::from_ymd_opt(2023, 8, 16)
            .unwrap()
            .and_hms_opt(19, 30, 0)
            .unwrap();
        OrderRecord::new(
            None,
            Some(ts),
            items.iter().map(|(n, q)| ItemLine::new(*n, *q)).collect(),
        )
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_weekday_table() {
        let records = vec![
            wednesday_dinner(&[("Naan", 2), ("Paneer", 1)]),
            wednesday_dinner(&[("Naan", 1)]),
        ];

        let table = ReportTable::weekday(&records, Weekday::Wed, SortKey::QuantityDesc);

        assert_eq!(table.headers, strings(&["Item", "Quantity", "Ordered Day"]));
        assert_eq!(
            table.rows,
            vec![
                strings(&["Naan", "3", "Wednesday"]),
                strings(&["Paneer", "1", "Wednesday"]),
            ]
        );
    }

    #[test]
    fn test_weekday_meal_table_empty_for_other_meal() {
        let records = vec![wednesday_dinner(&[("Naan", 2)])];

        let table = ReportTable::weekday_meal(&records, Weekday::Wed, MealType::Lunch, SortKey::Name);

        assert_eq!(table.headers, strings(&["Item", "Quantity"]));
        assert!(table.is_empty());
    }

    #[test]
    fn test_per_order_merges_within_order_only() {
        let records = vec![
            wednesday_dinner(&[("Naan", 1), ("Raita", 1), ("Naan", 2)]),
            wednesday_dinner(&[("Naan", 1)]),
        ];

        let table = ReportTable::per_order(&records);

        assert_eq!(
            table.rows,
            vec![
                strings(&["Naan", "3", "Wednesday"]),
                strings(&["Raita", "1", "Wednesday"]),
                strings(&["Naan", "1", "Wednesday"]),
            ]
        );
    }

    #[test]
    fn test_day_counts_table() {
        let table = ReportTable::day_counts(&[(Weekday::Sun, 2), (Weekday::Mon, 1)]);
        assert_eq!(
            table.rows,
            vec![strings(&["Sunday", "2"]), strings(&["Monday", "1"])]
        );
    }
}
