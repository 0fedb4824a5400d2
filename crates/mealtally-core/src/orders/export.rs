//! Parser for tabular order exports (one row per order).

use chrono::{Datelike, Weekday};
use tracing::{debug, warn};

use super::batch::BatchOutcome;
use super::rules::{parse_export_timestamp, parse_item_line};
use crate::models::config::ExportConfig;
use crate::models::order::{ItemLine, OrderRecord};

/// Raw fields of one export row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRow {
    pub order_id: Option<String>,
    /// Raw timestamp text.
    pub ordered_at: Option<String>,
    /// Item description cells, in column order.
    pub item_cells: Vec<String>,
    pub total_amount: Option<String>,
    pub promo_amount: Option<String>,
}

impl ExportRow {
    fn is_blank(&self) -> bool {
        self.order_id.is_none()
            && self.ordered_at.is_none()
            && self.total_amount.is_none()
            && self.item_cells.iter().all(|c| c.trim().is_empty())
    }
}

/// Turns export rows into order records.
pub struct ExportRowParser {
    timestamp_format: String,
}

impl ExportRowParser {
    pub fn new() -> Self {
        Self {
            timestamp_format: ExportConfig::default().timestamp_format,
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new().with_timestamp_format(&config.timestamp_format)
    }

    pub fn with_timestamp_format(mut self, format: &str) -> Self {
        self.timestamp_format = format.to_string();
        self
    }

    /// Normalize an item description: drop variants/add-ons after `+` and
    /// turn `_NA_` / `_` separators into spaces.
    pub fn clean_description(desc: &str) -> String {
        let base = desc.split('+').next().unwrap_or_default();
        base.replace("_NA_", " ").replace('_', " ")
    }

    /// Parse one `<name> <qty> <price>` description.
    pub fn parse_description(&self, desc: &str) -> Option<ItemLine> {
        let cleaned = Self::clean_description(desc);
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();

        if tokens.len() < 3 {
            warn!("Rejected item description {:?}: expected name, quantity and price", desc);
            return None;
        }

        parse_item_line(&tokens[..tokens.len() - 1].join(" "))
    }

    /// All item lines of a row; a cell may list several items separated by
    /// `", "`.
    pub fn parse_items(&self, row: &ExportRow) -> Vec<ItemLine> {
        row.item_cells
            .iter()
            .flat_map(|cell| cell.split(", "))
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .filter_map(|d| self.parse_description(d))
            .collect()
    }

    /// Build the record for one row.
    ///
    /// A row whose timestamp is missing or unparseable inherits `previous`
    /// as its weekday. Returns `None` for entirely blank rows.
    pub fn parse_row(&self, row: &ExportRow, previous: Option<Weekday>) -> Option<OrderRecord> {
        if row.is_blank() {
            return None;
        }

        let ordered_at = row
            .ordered_at
            .as_deref()
            .and_then(|raw| parse_export_timestamp(raw, &self.timestamp_format));

        let weekday = ordered_at.map(|t| t.weekday()).or(previous);
        let items = self.parse_items(row);

        Some(
            OrderRecord::new(row.order_id.clone(), ordered_at, items)
                .with_weekday(weekday)
                .with_amounts(row.total_amount.clone(), row.promo_amount.clone()),
        )
    }
}

impl Default for ExportRowParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse all export rows, forward-filling weekdays across continuation rows.
pub fn parse_export<I>(parser: &ExportRowParser, rows: I) -> BatchOutcome
where
    I: IntoIterator<Item = ExportRow>,
{
    let mut outcome = BatchOutcome::new();
    let mut previous = None;

    for (index, row) in rows.into_iter().enumerate() {
        match parser.parse_row(&row, previous) {
            Some(record) => {
                previous = record.weekday;
                outcome.push_record(record);
            }
            None => debug!("Skipping blank export row {}", index + 1),
        }
    }

    outcome
}
