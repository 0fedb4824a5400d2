//! Additive item aggregation keyed by exact item name.

use std::collections::HashMap;

use serde::Serialize;

use super::SortKey;
use crate::models::order::ItemLine;

/// One aggregated (item, quantity) row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub item: String,
    pub quantity: u64,
}

impl ReportRow {
    pub fn new(item: impl Into<String>, quantity: u64) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }
}

/// Running totals per item name.
///
/// Names are compared exactly (no case folding or trimming). Entries keep the
/// order in which each name was first seen.
#[derive(Debug, Clone, Default)]
pub struct AggregationBucket {
    entries: Vec<ReportRow>,
    index: HashMap<String, usize>,
}

impl AggregationBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quantity to the entry for `name`, creating it at 0 if absent.
    pub fn add_quantity(&mut self, name: &str, quantity: u64) {
        match self.index.get(name) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.quantity = entry.quantity.saturating_add(quantity);
            }
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push(ReportRow::new(name, quantity));
            }
        }
    }

    pub fn add(&mut self, line: &ItemLine) {
        self.add_quantity(&line.name, line.quantity);
    }

    /// Accumulated quantity for an item name.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.index.get(name).map(|&i| self.entries[i].quantity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows in first-seen order.
    pub fn rows(&self) -> &[ReportRow] {
        &self.entries
    }

    /// Rows ordered by `key`.
    pub fn into_sorted(self, key: SortKey) -> Vec<ReportRow> {
        let mut rows = self.entries;
        match key {
            SortKey::Name => rows.sort_by(|a, b| a.item.cmp(&b.item)),
            SortKey::QuantityDesc => rows.sort_by(|a, b| {
                b.quantity.cmp(&a.quantity).then_with(|| a.item.cmp(&b.item))
            }),
        }
        rows
    }
}

impl<'a> Extend<&'a ItemLine> for AggregationBucket {
    fn extend<T: IntoIterator<Item = &'a ItemLine>>(&mut self, iter: T) {
        for line in iter {
            self.add(line);
        }
    }
}

impl<'a> FromIterator<&'a ItemLine> for AggregationBucket {
    fn from_iter<T: IntoIterator<Item = &'a ItemLine>>(iter: T) -> Self {
        let mut bucket = Self::new();
        bucket.extend(iter);
        bucket
    }
}

/// Sum quantities per exact item name in a single pass.
pub fn aggregate<'a, I>(lines: I) -> AggregationBucket
where
    I: IntoIterator<Item = &'a ItemLine>,
{
    lines.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_duplicates_are_summed() {
        let lines = vec![
            ItemLine::new("Tawa Paratha", 1),
            ItemLine::new("Dhaba Style Double Anda Tadka", 1),
            ItemLine::new("Tawa Paratha", 1),
        ];

        let bucket = aggregate(&lines);

        assert_eq!(bucket.len(), 2);
        assert_eq!(bucket.get("Tawa Paratha"), Some(2));
        assert_eq!(bucket.get("Dhaba Style Double Anda Tadka"), Some(1));
    }

    #[test]
    fn test_exact_name_match_only() {
        let lines = vec![
            ItemLine::new("Lassi", 1),
            ItemLine::new("lassi", 2),
            ItemLine::new("Lassi ", 3),
        ];

        let bucket = aggregate(&lines);

        assert_eq!(bucket.len(), 3);
        assert_eq!(bucket.get("Lassi"), Some(1));
    }

    #[test]
    fn test_zero_quantity_creates_entry() {
        let bucket = aggregate(&[ItemLine::new("Raita", 0)]);
        assert_eq!(bucket.get("Raita"), Some(0));
    }

    #[test]
    fn test_sort_by_name() {
        let bucket = aggregate(&[
            ItemLine::new("Naan", 5),
            ItemLine::new("Biryani", 1),
            ItemLine::new("Lassi", 3),
        ]);

        let items: Vec<_> = bucket
            .into_sorted(SortKey::Name)
            .into_iter()
            .map(|r| r.item)
            .collect();
        assert_eq!(items, vec!["Biryani", "Lassi", "Naan"]);
    }

    #[test]
    fn test_quantity_desc_ties_by_name() {
        let bucket = aggregate(&[
            ItemLine::new("B", 2),
            ItemLine::new("C", 5),
            ItemLine::new("A", 2),
        ]);

        assert_eq!(
            bucket.into_sorted(SortKey::QuantityDesc),
            vec![
                ReportRow::new("C", 5),
                ReportRow::new("A", 2),
                ReportRow::new("B", 2),
            ]
        );
    }

    #[test]
    fn test_first_seen_order() {
        let bucket = aggregate(&[
            ItemLine::new("Naan", 1),
            ItemLine::new("Biryani", 1),
            ItemLine::new("Naan", 1),
        ]);

        assert_eq!(
            bucket.rows(),
            &[ReportRow::new("Naan", 2), ReportRow::new("Biryani", 1)]
        );
    }
}
