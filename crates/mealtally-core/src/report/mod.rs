//! Item aggregation and report tables.

mod aggregate;
mod builder;
pub mod calendar;
pub mod order_table;
pub mod table;

pub use aggregate::{AggregationBucket, ReportRow, aggregate};
pub use builder::{ReportBuilder, build_report};
pub use order_table::OrderTableRow;
pub use table::ReportTable;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Row order of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKey {
    /// Ascending by item name.
    #[default]
    Name,
    /// Descending by quantity, ties ascending by item name.
    QuantityDesc,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Name => f.write_str("NAME"),
            SortKey::QuantityDesc => f.write_str("QUANTITY_DESC"),
        }
    }
}

impl FromStr for SortKey {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "NAME" => Ok(SortKey::Name),
            "QUANTITY_DESC" | "QUANTITY" => Ok(SortKey::QuantityDesc),
            _ => Err(ExtractionError::Parse {
                field: "sort key".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
