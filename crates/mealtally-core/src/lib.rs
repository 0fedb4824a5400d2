//! Core library for food-delivery order reports.
//!
//! This crate provides:
//! - PDF receipt text extraction
//! - Order field rules (quantities, item lines, timestamps, amounts, meal types)
//! - Receipt and tabular export extraction into [`OrderRecord`]s
//! - Item aggregation and weekday/meal-type report tables

pub mod error;
pub mod models;
pub mod orders;
pub mod pdf;
pub mod report;

pub use error::{ExtractionError, PdfError, Result, TallyError};
pub use models::config::TallyConfig;
pub use models::order::{ItemLine, MealType, OrderRecord};
pub use orders::{
    BatchOutcome, ExportRow, ExportRowParser, ExtractionResult, OrderExtractor, ReceiptParser,
    RecordFailure, extract_batch, parse_export,
};
pub use orders::rules::{classify, parse_item_line, parse_quantity, parse_receipt_item_line};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use report::{
    AggregationBucket, ReportBuilder, ReportRow, ReportTable, SortKey, aggregate, build_report,
};
