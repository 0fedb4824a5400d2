//! Persisted order summary table, written after extraction and read back by
//! later report runs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ExtractionError;
use crate::models::order::{MealType, OrderRecord};
use crate::orders::rules::{parse_item_line, parse_weekday, weekday_name};

/// Timestamp format of the `ordered_date_time` column.
pub const TABLE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the order summary table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTableRow {
    pub order_id: Option<String>,
    pub ordered_date_time: Option<String>,
    pub ordered_day: Option<String>,
    pub ordered_time: Option<String>,
    pub ordered_type: Option<String>,
    /// JSON array of `"<name> <qty>"` strings.
    pub ordered_items_list: String,
    pub total_amount: Option<String>,
    pub promo: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl OrderTableRow {
    /// Column names, in field order.
    pub const HEADERS: [&'static str; 8] = [
        "order_id",
        "ordered_date_time",
        "ordered_day",
        "ordered_time",
        "ordered_type",
        "ordered_items_list",
        "total_amount",
        "promo",
    ];

    pub fn from_record(record: &OrderRecord) -> Self {
        let items: Vec<String> = record.items.iter().map(|i| i.to_string()).collect();

        Self {
            order_id: record.order_id.clone(),
            ordered_date_time: record
                .ordered_at
                .map(|t| t.format(TABLE_TIMESTAMP_FORMAT).to_string()),
            ordered_day: record.weekday.map(|d| weekday_name(d).to_string()),
            ordered_time: record.ordered_time(),
            ordered_type: record.meal_type.map(|m| m.to_string()),
            // Serializing a Vec<String> cannot fail.
            ordered_items_list: serde_json::to_string(&items).unwrap_or_else(|_| "[]".to_string()),
            total_amount: record.total_amount.clone(),
            promo: record.promo_amount.clone(),
        }
    }

    /// Rebuild the order record.
    ///
    /// Weekday and meal type columns take precedence over values derived from
    /// the timestamp. Malformed item entries are dropped.
    pub fn into_record(self) -> Result<OrderRecord, ExtractionError> {
        let ordered_at = non_empty(&self.ordered_date_time)
            .map(|raw| {
                NaiveDateTime::parse_from_str(raw, TABLE_TIMESTAMP_FORMAT).map_err(|e| {
                    ExtractionError::Timestamp {
                        value: raw.to_string(),
                        reason: e.to_string(),
                    }
                })
            })
            .transpose()?;

        let raw_items: Vec<String> = if self.ordered_items_list.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&self.ordered_items_list).map_err(|_| ExtractionError::Parse {
                field: "ordered_items_list".to_string(),
                value: self.ordered_items_list.clone(),
            })?
        };

        let items = raw_items
            .iter()
            .filter_map(|raw| {
                let item = parse_item_line(raw);
                if item.is_none() {
                    warn!("Dropping malformed item entry {:?}", raw);
                }
                item
            })
            .collect();

        let mut record = OrderRecord::new(self.order_id.clone(), ordered_at, items);

        if let Some(day) = non_empty(&self.ordered_day) {
            record = record.with_weekday(Some(parse_weekday(day)?));
        }
        if let Some(meal) = non_empty(&self.ordered_type) {
            record = record.with_meal_type(Some(meal.parse::<MealType>()?));
        }

        let promo = Some(self.promo).filter(|p| !p.trim().is_empty());
        Ok(record.with_amounts(self.total_amount, promo))
    }
}
