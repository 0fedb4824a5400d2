//! Configuration structures for receipt extraction, exports and reports.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::TallyError;
use crate::models::order::MealType;
use crate::orders::rules::parse_weekday;
use crate::report::SortKey;

/// Main configuration for mealtally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    /// PDF receipt configuration.
    pub receipts: ReceiptConfig,

    /// Tabular export configuration.
    pub export: ExportConfig,

    /// Report output configuration.
    pub report: ReportConfig,
}

/// PDF receipt configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    /// Fail a receipt whose timestamp is present but malformed.
    pub strict_timestamps: bool,

    /// Directory scanned for receipts when no pattern is given.
    pub input_dir: PathBuf,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            strict_timestamps: true,
            input_dir: PathBuf::from("zomato_orders"),
        }
    }
}

/// Tabular export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Preamble lines before the header row.
    pub skip_rows: usize,

    /// Order id column header.
    pub order_id_column: String,

    /// Order timestamp column header.
    pub timestamp_column: String,

    /// Bill total column header.
    pub total_column: String,

    /// Promo column header, if the export has one.
    pub promo_column: Option<String>,

    /// Item description column headers.
    pub item_columns: Vec<String>,

    /// Treat cells under blank headers as extra item descriptions.
    pub include_unnamed_columns: bool,

    /// chrono format of the timestamp column.
    pub timestamp_format: String,

    /// Weekday the per-order item summary is filtered to.
    pub weekday: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            skip_rows: 5,
            order_id_column: "Order ID".to_string(),
            timestamp_column: "Order-relay-time(ordered time)".to_string(),
            total_column: "Total-bill-amount <bill>".to_string(),
            promo_column: None,
            item_columns: vec!["Item1-name_reward_type_quantity_price+Variants+Addons".to_string()],
            include_unnamed_columns: true,
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            weekday: "Wednesday".to_string(),
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory report tables are written to.
    pub output_dir: PathBuf,

    /// Meal types that get a per-weekday table.
    pub meal_types: Vec<MealType>,

    /// Row order of report tables.
    pub sort: SortKey,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("result"),
            meal_types: vec![MealType::Lunch, MealType::Dinner],
            sort: SortKey::QuantityDesc,
        }
    }
}

impl TallyConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> crate::Result<()> {
        parse_weekday(&self.export.weekday)
            .map_err(|e| TallyError::Config(format!("export.weekday: {}", e)))?;

        if self.export.item_columns.is_empty() && !self.export.include_unnamed_columns {
            return Err(TallyError::Config(
                "export.item_columns is empty and unnamed columns are excluded".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
