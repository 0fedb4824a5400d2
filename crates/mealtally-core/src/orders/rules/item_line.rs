//! Item line parsing for receipts and exports.

use tracing::{debug, warn};

use super::FieldExtractor;
use super::patterns::{ITEMS_SECTION, RECEIPT_ITEM};
use super::quantity::parse_quantity;
use crate::models::order::ItemLine;

/// Split an order line into an item name and a trailing quantity.
///
/// The last whitespace-separated token is the quantity; the preceding tokens,
/// joined by single spaces, form the name. Lines with fewer than two tokens
/// are rejected.
pub fn parse_item_line(line: &str) -> Option<ItemLine> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (quantity, name) = tokens.split_last()?;
    if name.is_empty() {
        return None;
    }

    Some(ItemLine::new(name.join(" "), parse_quantity(quantity)))
}

/// Parse a receipt line of the form `<name> <qty> x <unit price> <amount>`.
///
/// The `x <price> <amount>` suffix is stripped before the name/quantity split.
/// Lines without that suffix are skipped.
pub fn parse_receipt_item_line(raw: &str) -> Option<ItemLine> {
    let raw = raw.trim();
    match RECEIPT_ITEM.captures(raw) {
        Some(caps) => {
            let item = parse_item_line(&caps[1]);
            if item.is_none() {
                warn!("Rejected receipt item line without a name: {:?}", raw);
            }
            item
        }
        None => {
            warn!("Unmatched receipt item line: {:?}", raw);
            None
        }
    }
}

/// Extracts item lines from the summary block of a receipt.
pub struct ReceiptItemExtractor;

impl ReceiptItemExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Candidate item strings between the section markers.
    ///
    /// Line breaks are folded into spaces and the block is split on double
    /// spaces, which is where the receipt separates one item from the next.
    pub fn candidates(&self, text: &str) -> Option<Vec<String>> {
        let caps = ITEMS_SECTION.captures(text)?;
        let block = caps[1].trim().replace('\n', " ");

        Some(
            block
                .split("  ")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

impl Default for ReceiptItemExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ReceiptItemExtractor {
    type Output = ItemLine;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let Some(candidates) = self.candidates(text) else {
            debug!("No item section found");
            return Vec::new();
        };

        candidates
            .iter()
            .filter_map(|c| parse_receipt_item_line(c))
            .collect()
    }
}
