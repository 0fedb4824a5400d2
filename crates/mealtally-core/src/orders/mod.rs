//! Order extraction from receipts and tabular exports.

mod batch;
mod export;
mod receipt;
pub mod rules;

pub use batch::{BatchOutcome, RecordFailure, extract_batch};
pub use export::{ExportRow, ExportRowParser, parse_export};
pub use receipt::{ExtractionResult, ReceiptParser};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for extractors turning the raw text of one order into a record.
pub trait OrderExtractor {
    /// Extract one order record from its full text.
    fn extract(&self, text: &str) -> Result<ExtractionResult>;
}
