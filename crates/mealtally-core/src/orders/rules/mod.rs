//! Rule-based field extractors for order receipts and exports.

pub mod amounts;
pub mod item_line;
pub mod labels;
pub mod meal;
pub mod patterns;
pub mod quantity;
pub mod timestamps;

pub use amounts::parse_amount;
pub use item_line::{ReceiptItemExtractor, parse_item_line, parse_receipt_item_line};
pub use labels::{LabeledValueExtractor, extract_order_id};
pub use meal::classify;
pub use quantity::parse_quantity;
pub use timestamps::{
    parse_export_timestamp, parse_receipt_timestamp, parse_weekday, strip_ordinal_suffixes,
    weekday_name,
};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
