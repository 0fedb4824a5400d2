//! Receipt parser for fixed-template PDF order receipts.

use std::time::Instant;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::models::config::ReceiptConfig;
use crate::models::order::OrderRecord;

use super::rules::{
    FieldExtractor, LabeledValueExtractor, ReceiptItemExtractor, extract_order_id,
    parse_receipt_item_line, parse_receipt_timestamp,
    patterns::{PAID_MARKER, PROMO_LABEL, TOTAL_LABEL},
};
use super::{OrderExtractor, Result};
use crate::error::ExtractionError;

/// Result of extracting one order.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted order record.
    pub record: OrderRecord,
    /// Fields that were absent or lines that were dropped.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Warning text for a field the receipt does not carry.
fn missing(field: &str) -> String {
    ExtractionError::MissingField(field.to_string()).to_string()
}

/// Best-effort parser for receipt text.
///
/// Every field is extracted independently. The only failure that rejects a
/// whole receipt is a timestamp that is present but malformed, and only when
/// strict timestamps are enabled.
pub struct ReceiptParser {
    strict_timestamps: bool,
}

impl ReceiptParser {
    /// Create a new receipt parser with default settings.
    pub fn new() -> Self {
        Self {
            strict_timestamps: true,
        }
    }

    /// Create a parser from the receipts configuration section.
    pub fn from_config(config: &ReceiptConfig) -> Self {
        Self::new().with_strict_timestamps(config.strict_timestamps)
    }

    /// Set whether a malformed timestamp fails the receipt.
    pub fn with_strict_timestamps(mut self, strict: bool) -> Self {
        self.strict_timestamps = strict;
        self
    }

    /// Locate and parse the timestamp on the last non-empty line before the
    /// paid marker.
    fn extract_ordered_at(
        &self,
        text: &str,
        warnings: &mut Vec<String>,
    ) -> Result<Option<NaiveDateTime>> {
        let Some(marker) = text.find(PAID_MARKER) else {
            warnings.push(missing("order timestamp"));
            return Ok(None);
        };

        let Some(line) = text[..marker]
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| !l.is_empty())
        else {
            warnings.push(missing("order timestamp"));
            return Ok(None);
        };

        match parse_receipt_timestamp(line) {
            Ok(ts) => Ok(Some(ts)),
            Err(e) if self.strict_timestamps => Err(e),
            Err(e) => {
                warn!("Ignoring malformed timestamp: {}", e);
                warnings.push(e.to_string());
                Ok(None)
            }
        }
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderExtractor for ReceiptParser {
    fn extract(&self, text: &str) -> Result<ExtractionResult> {
        let start = Instant::now();
        let mut warnings = Vec::new();

        if text.trim().is_empty() {
            return Err(ExtractionError::NoData);
        }

        info!("Parsing receipt from {} characters of text", text.len());

        let order_id = extract_order_id(text);
        if order_id.is_none() {
            warnings.push(missing("order id"));
        }

        let ordered_at = self.extract_ordered_at(text, &mut warnings)?;

        let items = match ReceiptItemExtractor::new().candidates(text) {
            Some(candidates) => {
                let items: Vec<_> = candidates
                    .iter()
                    .filter_map(|c| parse_receipt_item_line(c))
                    .collect();
                if items.len() < candidates.len() {
                    warnings.push(format!(
                        "Dropped {} unmatched item line(s)",
                        candidates.len() - items.len()
                    ));
                }
                items
            }
            None => {
                warnings.push(missing("item section"));
                Vec::new()
            }
        };

        let total_amount = LabeledValueExtractor::new(TOTAL_LABEL).extract(text);
        if total_amount.is_none() {
            warnings.push(missing("total amount"));
        }
        let promo_amount = LabeledValueExtractor::new(PROMO_LABEL).extract(text);

        let record = OrderRecord::new(order_id, ordered_at, items)
            .with_amounts(total_amount, promo_amount);

        debug!(
            "Extracted order {:?} with {} item(s), {} warning(s)",
            record.order_id,
            record.items.len(),
            warnings.len()
        );

        Ok(ExtractionResult {
            record,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}
